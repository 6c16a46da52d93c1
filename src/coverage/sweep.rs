//! Parallel interior tracks clipped to a polygon
//!
//! The polygon is rotated so the travel direction lies along +x, cut by
//! horizontal scanlines half a spacing in from the bottom of its bounding
//! box, and the resulting spans are rotated back.

use geo::{Coord, LineString, Rotate};
use tracing::debug;

use super::direction::normalize_undirected;
use super::path::LineSegmentPath;
use crate::error::{PlanError, PlanResult, check_spacing};
use crate::geometry::FieldPolygon;

/// Upper bound on scanlines per sweep
pub const MAX_SWEEP_LINES: usize = 100_000;

/// Spans shorter than this (meters) are dropped as rounding noise
const MIN_SPAN_LENGTH: f64 = 1e-9;

/// Parallel tracks over `polygon` at `spacing` along `angle_degrees`
///
/// The angle is taken modulo 180°. Within one scanline, spans are emitted
/// in increasing x of the rotated frame. With `boustrophedon`, every
/// second emitted track is reversed.
pub fn sweep_tracks(
    polygon: &FieldPolygon,
    spacing: f64,
    angle_degrees: f64,
    boustrophedon: bool,
) -> PlanResult<Vec<LineSegmentPath>> {
    let spacing = check_spacing(spacing)?;
    if !angle_degrees.is_finite() {
        return Err(PlanError::InvalidAngle(angle_degrees));
    }
    let angle = normalize_undirected(angle_degrees);
    let pivot = polygon.centroid();

    let rotated = polygon.rotated_copy(-angle, pivot);
    let bounds = rotated.bounds();

    // Counted in f64: a tiny spacing can exceed usize
    let lines = (bounds.height() / spacing).floor() + 1.0;
    if lines > MAX_SWEEP_LINES as f64 {
        return Err(PlanError::ResourceExhausted {
            lines: lines.min(usize::MAX as f64) as usize,
            limit: MAX_SWEEP_LINES,
        });
    }

    let mut tracks = Vec::new();
    for i in 0usize.. {
        let y = bounds.min_y + spacing / 2.0 + spacing * i as f64;
        if y > bounds.max_y {
            break;
        }

        for (x0, x1) in scanline_spans(&rotated, y) {
            let back = LineString::from(vec![Coord { x: x0, y }, Coord { x: x1, y }])
                .rotate_around_point(angle, pivot.into());
            if let Some(track) = LineSegmentPath::new(back.0) {
                tracks.push(track);
            }
        }
    }

    if boustrophedon {
        for track in tracks.iter_mut().skip(1).step_by(2) {
            track.reverse();
        }
    }

    debug!(angle, spacing, tracks = tracks.len(), "sweep complete");
    Ok(tracks)
}

/// Inside spans of the horizontal line at `y`, left to right
///
/// Edges use a half-open rule on y so a vertex on the line is counted
/// once and horizontal edges never contribute.
fn scanline_spans(polygon: &FieldPolygon, y: f64) -> Vec<(f64, f64)> {
    let mut crossings: Vec<f64> = polygon
        .edges()
        .filter(|(p1, p2)| (p1.y <= y && p2.y > y) || (p2.y <= y && p1.y > y))
        .map(|(p1, p2)| p1.x + (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y))
        .collect();

    crossings.sort_by(|a, b| a.total_cmp(b));

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(x0, x1)| x1 - x0 > MIN_SPAN_LENGTH)
        .collect()
}
