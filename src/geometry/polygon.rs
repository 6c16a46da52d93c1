//! Field boundary model
//!
//! A [`FieldPolygon`] is an implicitly closed ring of planar points. The
//! closing vertex is never stored; [`FieldPolygon::exterior_ring`] adds it
//! back for consumers that want an explicit ring.

use geo::{Coord, Intersects, LineString, Polygon, Rotate};

use super::Bounds;
use super::simplify::dedup_ring;
use crate::error::{PlanError, PlanResult};

/// A planar point in meters
pub type Point2D = Coord<f64>;

/// Points closer than this are treated as the same vertex
pub const VERTEX_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPolygon {
    vertices: Vec<Point2D>,
}

impl FieldPolygon {
    /// Build a polygon from at least 3 distinct points
    ///
    /// Consecutive duplicates and a repeated closing point are removed
    /// before counting.
    pub fn new(points: impl IntoIterator<Item = Point2D>) -> PlanResult<Self> {
        let points: Vec<Point2D> = points.into_iter().collect();
        let vertices = dedup_ring(&points, VERTEX_TOLERANCE);

        let distinct = count_distinct(&vertices);
        if distinct < 3 || vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(PlanError::DegeneratePolygon { distinct });
        }

        Ok(Self { vertices })
    }

    pub fn from_tuples(points: &[(f64, f64)]) -> PlanResult<Self> {
        Self::new(points.iter().map(|&(x, y)| Coord { x, y }))
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed point sequence (last point repeats the first)
    pub fn exterior_ring(&self) -> Vec<Point2D> {
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        ring
    }

    /// Edges as (start, end) pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_coords(&self.vertices).unwrap_or(Bounds {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        })
    }

    /// Arithmetic mean of the vertices (not the area centroid)
    pub fn centroid(&self) -> Point2D {
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Coord {
            x: sx / n,
            y: sy / n,
        }
    }

    /// Shoelace area; positive for counter-clockwise rings
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn contains_or_on_boundary(&self, point: Point2D) -> bool {
        self.to_geo().intersects(&point)
    }

    /// Copy with every vertex rotated about `pivot`, counter-clockwise positive
    pub fn rotated_copy(&self, angle_degrees: f64, pivot: Point2D) -> Self {
        let rotated = LineString::from(self.vertices.clone())
            .rotate_around_point(angle_degrees, pivot.into());
        Self {
            vertices: rotated.0,
        }
    }

    /// True when no two non-adjacent edges touch or cross
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return true;
        }

        let edges: Vec<(Point2D, Point2D)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 2)..n {
                // First and last edge share a vertex
                if i == 0 && j == n - 1 {
                    continue;
                }
                if segments_intersect(edges[i].0, edges[i].1, edges[j].0, edges[j].1) {
                    return false;
                }
            }
        }
        true
    }

    pub fn to_geo(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.exterior_ring()), Vec::new())
    }
}

fn count_distinct(points: &[Point2D]) -> usize {
    let mut distinct: Vec<Point2D> = Vec::with_capacity(points.len());
    for &p in points {
        if !distinct
            .iter()
            .any(|d| (d.x - p.x).hypot(d.y - p.y) <= VERTEX_TOLERANCE)
        {
            distinct.push(p);
        }
    }
    distinct.len()
}

fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn on_segment(p: Point2D, a: Point2D, b: Point2D) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Closed-segment intersection test using orientation signs
fn segments_intersect(a1: Point2D, a2: Point2D, b1: Point2D, b2: Point2D) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(a1, b1, b2))
        || (d2 == 0.0 && on_segment(a2, b1, b2))
        || (d3 == 0.0 && on_segment(b1, a1, a2))
        || (d4 == 0.0 && on_segment(b2, a1, a2))
}
