use serde::Deserialize;

use crate::error::{PlanError, PlanResult};
use crate::geometry::FieldPolygon;

/// Relative tolerance when comparing edge lengths
const EDGE_TIE_EPSILON: f64 = 1e-9;

/// How the sweep direction is chosen for a field
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionSpec {
    #[default]
    LongestEdgeParallel,
    LongestEdgePerpendicular,
    /// Degrees from the positive x-axis, counter-clockwise
    ExplicitAngle(f64),
    VertexPair(usize, usize),
    /// Same computation as `VertexPair`; the vertices span the field
    Diagonal(usize, usize),
}

impl DirectionSpec {
    /// Resolve to a single angle in degrees for `polygon`
    pub fn resolve(&self, polygon: &FieldPolygon) -> PlanResult<f64> {
        match *self {
            DirectionSpec::LongestEdgeParallel => Ok(longest_edge_angle(polygon)),
            DirectionSpec::LongestEdgePerpendicular => {
                Ok(normalize_undirected(longest_edge_angle(polygon) + 90.0))
            }
            DirectionSpec::ExplicitAngle(angle) if angle.is_finite() => Ok(angle),
            DirectionSpec::ExplicitAngle(angle) => Err(PlanError::InvalidAngle(angle)),
            DirectionSpec::VertexPair(a, b) | DirectionSpec::Diagonal(a, b) => {
                vertex_pair_angle(polygon, a, b)
            }
        }
    }
}

/// Fold an angle into [0, 180); a line and its 180° twin are the same track
pub fn normalize_undirected(angle: f64) -> f64 {
    let folded = angle.rem_euclid(180.0);
    if folded >= 180.0 { 0.0 } else { folded }
}

/// Index of the longest edge; the first of several equal edges wins
pub fn longest_edge_index(polygon: &FieldPolygon) -> usize {
    let mut best_index = 0;
    let mut best_length = f64::NEG_INFINITY;

    for (i, (a, b)) in polygon.edges().enumerate() {
        let length = (b.x - a.x).hypot(b.y - a.y);
        if length > best_length * (1.0 + EDGE_TIE_EPSILON) || best_length == f64::NEG_INFINITY {
            best_index = i;
            best_length = length;
        }
    }

    best_index
}

/// Undirected angle of the longest edge, in [0, 180)
pub fn longest_edge_angle(polygon: &FieldPolygon) -> f64 {
    let index = longest_edge_index(polygon);
    let vertices = polygon.vertices();
    let a = vertices[index];
    let b = vertices[(index + 1) % vertices.len()];
    normalize_undirected((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

fn vertex_pair_angle(polygon: &FieldPolygon, a: usize, b: usize) -> PlanResult<f64> {
    let vertices = polygon.vertices();
    let count = vertices.len();
    if a == b || a >= count || b >= count {
        return Err(PlanError::InvalidVertexIndex { a, b, count });
    }

    let (from, to) = (vertices[a], vertices[b]);
    Ok((to.y - from.y).atan2(to.x - from.x).to_degrees())
}
