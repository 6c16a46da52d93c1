use crate::export::NamedRecord;
use crate::geometry::Point2D;

/// One continuous pass of the vehicle; travel runs first point to last
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegmentPath {
    points: Vec<Point2D>,
}

impl LineSegmentPath {
    /// Returns `None` for fewer than 2 points
    pub fn new(points: Vec<Point2D>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn start(&self) -> Point2D {
        self.points[0]
    }

    pub fn end(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum()
    }

    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

/// Result of one planning request
///
/// Headland rings (outermost first) come before the interior sweep
/// tracks (in sweep order).
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePlan {
    paths: Vec<LineSegmentPath>,
    headland_count: usize,
    direction_deg: f64,
}

impl CoveragePlan {
    pub fn new(
        headland: Vec<LineSegmentPath>,
        tracks: Vec<LineSegmentPath>,
        direction_deg: f64,
    ) -> Self {
        let headland_count = headland.len();
        let mut paths = headland;
        paths.extend(tracks);
        Self {
            paths,
            headland_count,
            direction_deg,
        }
    }

    /// All paths in travel order
    pub fn paths(&self) -> &[LineSegmentPath] {
        &self.paths
    }

    pub fn headland_rings(&self) -> &[LineSegmentPath] {
        &self.paths[..self.headland_count]
    }

    pub fn sweep_tracks(&self) -> &[LineSegmentPath] {
        &self.paths[self.headland_count..]
    }

    /// Resolved sweep direction, degrees counter-clockwise from +x
    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    pub fn total_length(&self) -> f64 {
        self.paths.iter().map(LineSegmentPath::length).sum()
    }

    /// Named polylines for export: `headland_<n>` then `track_<n>`, 1-based
    pub fn to_records(&self) -> Vec<NamedRecord> {
        let headland = self
            .headland_rings()
            .iter()
            .enumerate()
            .map(|(i, p)| NamedRecord::line(format!("headland_{}", i + 1), "headland", p.points()));
        let tracks = self
            .sweep_tracks()
            .iter()
            .enumerate()
            .map(|(i, p)| NamedRecord::line(format!("track_{}", i + 1), "track", p.points()));
        headland.chain(tracks).collect()
    }
}
