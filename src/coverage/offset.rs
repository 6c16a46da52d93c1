//! Headland rings by inward polygon offsetting
//!
//! Each ring is the boundary buffered inward by `width * pass`, computed
//! from the original boundary rather than from the previous ring. Arcs
//! produced at reflex corners are flattened to short chords.

use std::panic;

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use geo::{Contains, Coord};
use tracing::{debug, warn};

use crate::error::{PlanError, PlanResult, check_spacing};
use crate::geometry::FieldPolygon;
use crate::geometry::simplify::{RING_EPSILON, simplify_ring};

/// Rings with less area than this (m²) count as exhausted
const MIN_RING_AREA: f64 = 1e-6;

/// Largest angular step when flattening offset arcs
const ARC_STEP_DEG: f64 = 5.0;

/// Inward offset rings for `passes` headland passes, outermost first
///
/// Stops early, without error, once a ring vanishes, degenerates or
/// self-intersects.
pub fn headland_rings(
    polygon: &FieldPolygon,
    width: f64,
    passes: usize,
) -> PlanResult<Vec<FieldPolygon>> {
    let width = check_spacing(width)?;
    let boundary = to_clockwise_pline(polygon);
    let mut rings: Vec<FieldPolygon> = Vec::with_capacity(passes);

    for pass in 1..=passes {
        let distance = width * pass as f64;
        let ring = match offset_pline(&boundary, distance, pass) {
            Ok(ring) => ring,
            Err(e) => {
                debug!(pass, distance, error = %e, "headland generation stopped");
                break;
            }
        };

        let parent = rings.last().unwrap_or(polygon);
        if !strictly_contains(parent, &ring) {
            debug!(pass, "offset ring escapes its parent, stopping");
            break;
        }

        debug!(pass, vertices = ring.len(), area = ring.area(), "headland ring");
        rings.push(ring);
    }

    Ok(rings)
}

/// Offset `polygon` inward by `distance` once
///
/// `pass` only labels the error; it does not scale the distance.
pub fn inward_offset(polygon: &FieldPolygon, distance: f64, pass: usize) -> PlanResult<FieldPolygon> {
    let distance = check_spacing(distance)?;
    offset_pline(&to_clockwise_pline(polygon), distance, pass)
}

/// The polygon the interior sweep should cover
pub fn inner_working_polygon<'a>(
    polygon: &'a FieldPolygon,
    rings: &'a [FieldPolygon],
) -> &'a FieldPolygon {
    rings.last().unwrap_or(polygon)
}

fn offset_pline(boundary: &Polyline<f64>, distance: f64, pass: usize) -> PlanResult<FieldPolygon> {
    let offsets =
        match panic::catch_unwind(panic::AssertUnwindSafe(|| boundary.parallel_offset(-distance))) {
            Ok(offsets) => offsets,
            Err(_) => {
                warn!(pass, distance, "panic during parallel offset");
                return Err(PlanError::SelfIntersectingPolygon { pass });
            }
        };

    // A narrow waist can split the field; keep the largest piece
    let Some(largest) = offsets
        .iter()
        .filter(|p| p.is_closed())
        .max_by(|a, b| a.area().abs().total_cmp(&b.area().abs()))
    else {
        return Err(PlanError::DegeneratePolygon { distinct: 0 });
    };

    if offsets.len() > 1 {
        debug!(pass, pieces = offsets.len(), "offset split the field");
    }

    let points = simplify_ring(&flatten_pline(largest), RING_EPSILON);
    let ring = FieldPolygon::new(points)?;

    if ring.area() < MIN_RING_AREA {
        return Err(PlanError::DegeneratePolygon { distinct: ring.len() });
    }
    if !ring.is_simple() {
        return Err(PlanError::SelfIntersectingPolygon { pass });
    }

    Ok(ring)
}

/// Closed polyline with clockwise orientation
fn to_clockwise_pline(polygon: &FieldPolygon) -> Polyline<f64> {
    let mut vertices = polygon.vertices().to_vec();
    if polygon.is_counter_clockwise() {
        vertices.reverse();
    }

    let mut pline = Polyline::new();
    for p in vertices {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);
    pline
}

/// Sample bulge (arc) segments into straight chords
fn flatten_pline(pline: &Polyline<f64>) -> Vec<Coord<f64>> {
    let vertices = &pline.vertex_data;
    let n = vertices.len();
    let mut points = Vec::with_capacity(n);

    for i in 0..n {
        let v1 = vertices[i];
        let v2 = vertices[(i + 1) % n];
        points.push(Coord { x: v1.x, y: v1.y });

        if v1.bulge.abs() < 1e-12 {
            continue;
        }

        // Bulge is tan(sweep / 4); the center sits left of the chord for positive bulge
        let sweep = 4.0 * v1.bulge.atan();
        let (dx, dy) = (v2.x - v1.x, v2.y - v1.y);
        let k = (1.0 - v1.bulge * v1.bulge) / (4.0 * v1.bulge);
        let center = Coord {
            x: v1.x + dx / 2.0 - k * dy,
            y: v1.y + dy / 2.0 + k * dx,
        };
        let radius = (v1.x - center.x).hypot(v1.y - center.y);
        let start = (v1.y - center.y).atan2(v1.x - center.x);

        let steps = (sweep.abs().to_degrees() / ARC_STEP_DEG).ceil().max(1.0) as usize;
        for s in 1..steps {
            let a = start + sweep * s as f64 / steps as f64;
            points.push(Coord {
                x: center.x + radius * a.cos(),
                y: center.y + radius * a.sin(),
            });
        }
    }

    points
}

fn strictly_contains(outer: &FieldPolygon, inner: &FieldPolygon) -> bool {
    inner.area() < outer.area() && outer.to_geo().contains(&inner.to_geo())
}
