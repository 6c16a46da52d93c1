use geo::Coord;

/// Conversion between geodetic (lat, lon) and a local planar frame in meters
///
/// Implementations must be mutual inverses within their approximation error.
pub trait PlanarProjection {
    fn to_planar(&self, lat: f64, lon: f64) -> Coord<f64>;
    fn to_geodetic(&self, point: Coord<f64>) -> (f64, f64);
}

// Meters per degree at equator
const METERS_PER_DEGREE: f64 = 111320.0;

/// Equirectangular projection from WGS84 to local meters
///
/// Uses approximation suitable for field-scale areas:
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
#[derive(Debug, Clone)]
pub struct Projector {
    center_lat: f64,
    center_lon: f64,
    cos_lat: f64,
}

impl Projector {
    /// Create a new projector centered at the given coordinates
    ///
    /// # Arguments
    /// * `center` - (lat, lon) center point in WGS84
    pub fn new(center: (f64, f64)) -> Self {
        let (lat, lon) = center;
        Self {
            center_lat: lat,
            center_lon: lon,
            cos_lat: lat.to_radians().cos(),
        }
    }

    /// Projector centered on the vertex average of a geodetic ring
    ///
    /// A repeated closing vertex is counted once.
    pub fn centered_on(points: &[(f64, f64)]) -> Option<Self> {
        let points = match points {
            [first, .., last] if points.len() > 2 && first == last => &points[..points.len() - 1],
            _ => points,
        };
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.0).sum::<f64>() / n;
        let lon = points.iter().map(|p| p.1).sum::<f64>() / n;
        Some(Self::new((lat, lon)))
    }

    /// Project a slice of lat/lon points
    pub fn project_points(&self, points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points
            .iter()
            .map(|&(lat, lon)| self.to_planar(lat, lon))
            .collect()
    }
}

impl PlanarProjection for Projector {
    fn to_planar(&self, lat: f64, lon: f64) -> Coord<f64> {
        Coord {
            x: (lon - self.center_lon) * self.cos_lat * METERS_PER_DEGREE,
            y: (lat - self.center_lat) * METERS_PER_DEGREE,
        }
    }

    fn to_geodetic(&self, point: Coord<f64>) -> (f64, f64) {
        let lat = self.center_lat + point.y / METERS_PER_DEGREE;
        let lon = self.center_lon + point.x / (self.cos_lat * METERS_PER_DEGREE);
        (lat, lon)
    }
}
