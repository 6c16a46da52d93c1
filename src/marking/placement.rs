use geo::Coord;

use crate::coverage::direction::longest_edge_angle;
use crate::geometry::FieldPolygon;

/// Rigid transform from the pitch's own frame to the working frame
///
/// Points are rotated about the pitch origin, then translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rotation_deg: f64,
    pub translation: Coord<f64>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    pub fn new(rotation_deg: f64, translation: Coord<f64>) -> Self {
        Self {
            rotation_deg,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(0.0, Coord { x: 0.0, y: 0.0 })
    }

    /// Align the pitch length with the field's longest edge and put the
    /// pitch center on the field's vertex-average centroid
    pub fn centered_on(field: &FieldPolygon, length: f64, width: f64) -> Self {
        let rotation_deg = longest_edge_angle(field);
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let half = Coord {
            x: length / 2.0,
            y: width / 2.0,
        };
        let center = field.centroid();

        Self::new(
            rotation_deg,
            Coord {
                x: center.x - (half.x * cos - half.y * sin),
                y: center.y - (half.x * sin + half.y * cos),
            },
        )
    }

    pub fn apply(&self, p: Coord<f64>) -> Coord<f64> {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        Coord {
            x: p.x * cos - p.y * sin + self.translation.x,
            y: p.x * sin + p.y * cos + self.translation.y,
        }
    }

    pub fn apply_all(&self, points: &[Coord<f64>]) -> Vec<Coord<f64>> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_identity() {
        let p = coord! { x: 3.0, y: -2.0 };
        assert_eq!(Placement::identity().apply(p), p);
    }

    #[test]
    fn test_rotate_then_translate() {
        let placement = Placement::new(90.0, coord! { x: 10.0, y: 0.0 });
        let p = placement.apply(coord! { x: 1.0, y: 0.0 });
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_centered_on_field() {
        let field = FieldPolygon::from_tuples(&[
            (100.0, 100.0),
            (100.0, 220.0),
            (20.0, 220.0),
            (20.0, 100.0),
        ])
        .unwrap();
        let placement = Placement::centered_on(&field, 105.0, 68.0);

        // Longest edge runs along +y
        assert!((placement.rotation_deg - 90.0).abs() < 1e-9);

        let center = placement.apply(coord! { x: 52.5, y: 34.0 });
        assert!((center.x - 60.0).abs() < 1e-9);
        assert!((center.y - 160.0).abs() < 1e-9);
    }
}
