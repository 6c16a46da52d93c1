use geo::Coord;

/// Planar geometry of an exported record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordGeometry {
    Line(Vec<Coord<f64>>),
    Point(Coord<f64>),
}

impl RecordGeometry {
    pub fn points(&self) -> &[Coord<f64>] {
        match self {
            RecordGeometry::Line(points) => points,
            RecordGeometry::Point(p) => std::slice::from_ref(p),
        }
    }
}

/// A named polyline or point, independent of any file format
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRecord {
    pub name: String,
    /// Coarse grouping such as "headland", "track" or "marking"
    pub kind: String,
    pub geometry: RecordGeometry,
}

impl NamedRecord {
    pub fn line(name: impl Into<String>, kind: &str, points: &[Coord<f64>]) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            geometry: RecordGeometry::Line(points.to_vec()),
        }
    }

    pub fn point(name: impl Into<String>, kind: &str, point: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            kind: kind.to_string(),
            geometry: RecordGeometry::Point(point),
        }
    }
}
