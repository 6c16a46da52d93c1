//! Regulation pitch markings
//!
//! Every shape is built in the pitch frame (origin at a corner, x along
//! the length, y along the width) and then passed through a [`Placement`].

use std::f64::consts::TAU;
use std::fmt;

use geo::Coord;
use serde::Deserialize;
use tracing::debug;

use super::placement::Placement;
use crate::error::{PlanResult, check_spacing};
use crate::export::NamedRecord;

/// Regulation dimensions in meters
pub mod regulation {
    pub const CENTER_CIRCLE_RADIUS: f64 = 9.15;
    pub const PENALTY_AREA_DEPTH: f64 = 16.5;
    pub const PENALTY_AREA_WIDTH: f64 = 40.3;
    pub const GOAL_AREA_DEPTH: f64 = 5.5;
    pub const GOAL_AREA_WIDTH: f64 = 18.32;
    pub const PENALTY_SPOT_DISTANCE: f64 = 11.0;
    pub const PENALTY_ARC_RADIUS: f64 = 9.15;
    pub const CORNER_ARC_RADIUS: f64 = 1.0;

    pub const STANDARD_LENGTH: f64 = 105.0;
    pub const STANDARD_WIDTH: f64 = 68.0;
}

use regulation::*;

/// Coarsest penalty-arc sampling; the part outside the area spans about
/// 106°, so this keeps at least three samples after clipping
const MAX_PENALTY_ARC_STEP_DEG: f64 = 30.0;

fn default_circle_step() -> f64 {
    5.0
}
fn default_penalty_arc_step() -> f64 {
    2.0
}
fn default_corner_arc_step() -> f64 {
    2.0
}

/// Angular sample spacing for curved markings, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sampling {
    #[serde(default = "default_circle_step")]
    pub circle_step_deg: f64,
    #[serde(default = "default_penalty_arc_step")]
    pub penalty_arc_step_deg: f64,
    #[serde(default = "default_corner_arc_step")]
    pub corner_arc_step_deg: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            circle_step_deg: default_circle_step(),
            penalty_arc_step_deg: default_penalty_arc_step(),
            corner_arc_step_deg: default_corner_arc_step(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkingKind {
    Boundary,
    HalfwayLine,
    CenterCircle,
    PenaltyAreaLeft,
    PenaltyAreaRight,
    GoalAreaLeft,
    GoalAreaRight,
    PenaltyArcLeft,
    PenaltyArcRight,
    /// Counter-clockwise from the pitch origin: 0 at (0, 0), 1 at (L, 0),
    /// 2 at (L, W), 3 at (0, W)
    CornerArc(u8),
    PenaltySpotLeft,
    PenaltySpotRight,
}

impl MarkingKind {
    pub fn name(&self) -> String {
        match self {
            MarkingKind::Boundary => "boundary".to_string(),
            MarkingKind::HalfwayLine => "halfway_line".to_string(),
            MarkingKind::CenterCircle => "center_circle".to_string(),
            MarkingKind::PenaltyAreaLeft => "penalty_area_left".to_string(),
            MarkingKind::PenaltyAreaRight => "penalty_area_right".to_string(),
            MarkingKind::GoalAreaLeft => "goal_area_left".to_string(),
            MarkingKind::GoalAreaRight => "goal_area_right".to_string(),
            MarkingKind::PenaltyArcLeft => "penalty_arc_left".to_string(),
            MarkingKind::PenaltyArcRight => "penalty_arc_right".to_string(),
            MarkingKind::CornerArc(i) => format!("corner_arc_{}", i),
            MarkingKind::PenaltySpotLeft => "penalty_spot_left".to_string(),
            MarkingKind::PenaltySpotRight => "penalty_spot_right".to_string(),
        }
    }
}

impl fmt::Display for MarkingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkingGeometry {
    /// Implicitly closed ring
    Ring(Vec<Coord<f64>>),
    Polyline(Vec<Coord<f64>>),
    Spot(Coord<f64>),
}

impl MarkingGeometry {
    pub fn points(&self) -> &[Coord<f64>] {
        match self {
            MarkingGeometry::Ring(points) | MarkingGeometry::Polyline(points) => points,
            MarkingGeometry::Spot(p) => std::slice::from_ref(p),
        }
    }

    fn placed(&self, placement: &Placement) -> Self {
        match self {
            MarkingGeometry::Ring(points) => MarkingGeometry::Ring(placement.apply_all(points)),
            MarkingGeometry::Polyline(points) => {
                MarkingGeometry::Polyline(placement.apply_all(points))
            }
            MarkingGeometry::Spot(p) => MarkingGeometry::Spot(placement.apply(*p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchMarking {
    pub kind: MarkingKind,
    pub geometry: MarkingGeometry,
}

/// The full set of markings for one pitch, in a fixed order
#[derive(Debug, Clone, PartialEq)]
pub struct PitchMarkingSet {
    pub length: f64,
    pub width: f64,
    markings: Vec<PitchMarking>,
}

impl PitchMarkingSet {
    pub fn get(&self, kind: MarkingKind) -> Option<&MarkingGeometry> {
        self.markings
            .iter()
            .find(|m| m.kind == kind)
            .map(|m| &m.geometry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PitchMarking> {
        self.markings.iter()
    }

    pub fn len(&self) -> usize {
        self.markings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markings.is_empty()
    }

    /// Rings are emitted closed
    pub fn to_records(&self) -> Vec<NamedRecord> {
        self.markings
            .iter()
            .map(|m| {
                let name = m.kind.name();
                match &m.geometry {
                    MarkingGeometry::Ring(points) => {
                        let mut closed = points.clone();
                        closed.extend(points.first().copied());
                        NamedRecord::line(name, "marking", &closed)
                    }
                    MarkingGeometry::Polyline(points) => NamedRecord::line(name, "marking", points),
                    MarkingGeometry::Spot(p) => NamedRecord::point(name, "marking", *p),
                }
            })
            .collect()
    }
}

/// Builds [`PitchMarkingSet`]s with a given sampling density
#[derive(Debug, Clone, Default)]
pub struct PitchMarkingGenerator {
    sampling: Sampling,
}

impl PitchMarkingGenerator {
    pub fn new(sampling: Sampling) -> Self {
        Self { sampling }
    }

    /// All markings for a `length` x `width` pitch, placed by `placement`
    pub fn generate(
        &self,
        length: f64,
        width: f64,
        placement: &Placement,
    ) -> PlanResult<PitchMarkingSet> {
        let length = check_spacing(length)?;
        let width = check_spacing(width)?;
        check_spacing(self.sampling.circle_step_deg)?;
        check_spacing(self.sampling.penalty_arc_step_deg)?;
        check_spacing(self.sampling.corner_arc_step_deg)?;

        let markings: Vec<PitchMarking> = self
            .canonical(length, width)
            .into_iter()
            .map(|(kind, geometry)| PitchMarking {
                kind,
                geometry: geometry.placed(placement),
            })
            .collect();

        debug!(length, width, markings = markings.len(), "pitch markings generated");
        Ok(PitchMarkingSet {
            length,
            width,
            markings,
        })
    }

    fn canonical(&self, l: f64, w: f64) -> Vec<(MarkingKind, MarkingGeometry)> {
        let mid_y = w / 2.0;
        let center = Coord { x: l / 2.0, y: mid_y };
        let spot_left = Coord {
            x: PENALTY_SPOT_DISTANCE,
            y: mid_y,
        };
        let spot_right = Coord {
            x: l - PENALTY_SPOT_DISTANCE,
            y: mid_y,
        };

        let penalty_step = self.sampling.penalty_arc_step_deg.min(MAX_PENALTY_ARC_STEP_DEG);

        let mut markings = vec![
            (
                MarkingKind::Boundary,
                MarkingGeometry::Ring(rectangle(0.0, 0.0, l, w)),
            ),
            (
                MarkingKind::HalfwayLine,
                MarkingGeometry::Polyline(vec![
                    Coord { x: l / 2.0, y: 0.0 },
                    Coord { x: l / 2.0, y: w },
                ]),
            ),
            (
                MarkingKind::CenterCircle,
                MarkingGeometry::Ring(circle(center, CENTER_CIRCLE_RADIUS, self.sampling.circle_step_deg)),
            ),
            (
                MarkingKind::PenaltyAreaLeft,
                MarkingGeometry::Ring(goal_box(0.0, PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH, w)),
            ),
            (
                MarkingKind::PenaltyAreaRight,
                MarkingGeometry::Ring(goal_box(l - PENALTY_AREA_DEPTH, l, PENALTY_AREA_WIDTH, w)),
            ),
            (
                MarkingKind::GoalAreaLeft,
                MarkingGeometry::Ring(goal_box(0.0, GOAL_AREA_DEPTH, GOAL_AREA_WIDTH, w)),
            ),
            (
                MarkingKind::GoalAreaRight,
                MarkingGeometry::Ring(goal_box(l - GOAL_AREA_DEPTH, l, GOAL_AREA_WIDTH, w)),
            ),
            (
                MarkingKind::PenaltyArcLeft,
                MarkingGeometry::Polyline(
                    arc(spot_left, PENALTY_ARC_RADIUS, -180.0, 180.0, penalty_step)
                        .into_iter()
                        .filter(|p| p.x > PENALTY_AREA_DEPTH)
                        .collect(),
                ),
            ),
            (
                MarkingKind::PenaltyArcRight,
                MarkingGeometry::Polyline(
                    arc(spot_right, PENALTY_ARC_RADIUS, 0.0, 360.0, penalty_step)
                        .into_iter()
                        .filter(|p| p.x < l - PENALTY_AREA_DEPTH)
                        .collect(),
                ),
            ),
        ];

        let corners = [(0.0, 0.0), (l, 0.0), (l, w), (0.0, w)];
        for (i, &(x, y)) in corners.iter().enumerate() {
            let start = 90.0 * i as f64;
            markings.push((
                MarkingKind::CornerArc(i as u8),
                MarkingGeometry::Polyline(arc(
                    Coord { x, y },
                    CORNER_ARC_RADIUS,
                    start,
                    start + 90.0,
                    self.sampling.corner_arc_step_deg,
                )),
            ));
        }

        markings.push((MarkingKind::PenaltySpotLeft, MarkingGeometry::Spot(spot_left)));
        markings.push((MarkingKind::PenaltySpotRight, MarkingGeometry::Spot(spot_right)));

        markings
    }
}

/// Convenience wrapper using the default sampling
pub fn generate(length: f64, width: f64, placement: &Placement) -> PlanResult<PitchMarkingSet> {
    PitchMarkingGenerator::default().generate(length, width, placement)
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coord<f64>> {
    vec![
        Coord { x: x0, y: y0 },
        Coord { x: x1, y: y0 },
        Coord { x: x1, y: y1 },
        Coord { x: x0, y: y1 },
    ]
}

/// Box spanning `x0..x1`, centered across the pitch width
fn goal_box(x0: f64, x1: f64, box_width: f64, pitch_width: f64) -> Vec<Coord<f64>> {
    let y0 = (pitch_width - box_width) / 2.0;
    rectangle(x0, y0, x1, y0 + box_width)
}

/// Samples from `start_deg` to `end_deg` inclusive, at most `step_deg` apart
fn arc(center: Coord<f64>, radius: f64, start_deg: f64, end_deg: f64, step_deg: f64) -> Vec<Coord<f64>> {
    let sweep = end_deg - start_deg;
    let steps = (sweep.abs() / step_deg).ceil().max(1.0) as usize;

    (0..=steps)
        .map(|i| {
            let a = (start_deg + sweep * i as f64 / steps as f64).to_radians();
            Coord {
                x: center.x + radius * a.cos(),
                y: center.y + radius * a.sin(),
            }
        })
        .collect()
}

/// Full circle without the repeated closing sample
fn circle(center: Coord<f64>, radius: f64, step_deg: f64) -> Vec<Coord<f64>> {
    let steps = (360.0 / step_deg).ceil().max(3.0) as usize;
    (0..steps)
        .map(|i| {
            let a = TAU * i as f64 / steps as f64;
            Coord {
                x: center.x + radius * a.cos(),
                y: center.y + radius * a.sin(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn standard() -> PitchMarkingSet {
        generate(STANDARD_LENGTH, STANDARD_WIDTH, &Placement::identity()).unwrap()
    }

    fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    fn assert_points(actual: &[Coord<f64>], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert!((a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9, "{:?} vs ({}, {})", a, x, y);
        }
    }

    #[test]
    fn test_all_markings_present() {
        let set = standard();
        assert_eq!(set.len(), 15);
        for i in 0..4 {
            assert!(set.get(MarkingKind::CornerArc(i)).is_some());
        }
        assert!(set.get(MarkingKind::CornerArc(4)).is_none());
    }

    #[test]
    fn test_center_circle_radius() {
        let set = standard();
        let circle = set.get(MarkingKind::CenterCircle).unwrap();
        assert_eq!(circle.points().len(), 72);
        for &p in circle.points() {
            assert!((distance(p, coord! { x: 52.5, y: 34.0 }) - 9.15).abs() < 1e-6);
        }
    }

    #[test]
    fn test_penalty_and_goal_areas() {
        let set = standard();
        assert_points(
            set.get(MarkingKind::PenaltyAreaLeft).unwrap().points(),
            &[(0.0, 13.85), (16.5, 13.85), (16.5, 54.15), (0.0, 54.15)],
        );
        assert_points(
            set.get(MarkingKind::PenaltyAreaRight).unwrap().points(),
            &[(88.5, 13.85), (105.0, 13.85), (105.0, 54.15), (88.5, 54.15)],
        );
        assert_points(
            set.get(MarkingKind::GoalAreaLeft).unwrap().points(),
            &[(0.0, 24.84), (5.5, 24.84), (5.5, 43.16), (0.0, 43.16)],
        );
    }

    #[test]
    fn test_penalty_spots() {
        let set = standard();
        assert_eq!(
            set.get(MarkingKind::PenaltySpotLeft),
            Some(&MarkingGeometry::Spot(coord! { x: 11.0, y: 34.0 }))
        );
        assert_eq!(
            set.get(MarkingKind::PenaltySpotRight),
            Some(&MarkingGeometry::Spot(coord! { x: 94.0, y: 34.0 }))
        );
    }

    #[test]
    fn test_penalty_arcs_clipped_outside_area() {
        let set = standard();
        let left = set.get(MarkingKind::PenaltyArcLeft).unwrap().points();
        assert!(!left.is_empty());
        for &p in left {
            assert!(p.x > 16.5);
            assert!((distance(p, coord! { x: 11.0, y: 34.0 }) - 9.15).abs() < 1e-9);
        }
        // Contiguous: samples run bottom to top
        assert!(left.windows(2).all(|w| w[1].y > w[0].y));

        let right = set.get(MarkingKind::PenaltyArcRight).unwrap().points();
        assert_eq!(right.len(), left.len());
        for &p in right {
            assert!(p.x < 88.5);
        }
    }

    #[test]
    fn test_corner_arcs() {
        let set = standard();
        let corner = set.get(MarkingKind::CornerArc(2)).unwrap().points();
        assert_eq!(corner.len(), 46);
        for &p in corner {
            assert!((distance(p, coord! { x: 105.0, y: 68.0 }) - 1.0).abs() < 1e-9);
            assert!(p.x <= 105.0 + 1e-9 && p.y <= 68.0 + 1e-9);
        }
    }

    #[test]
    fn test_placement_is_applied() {
        let placement = Placement::new(90.0, coord! { x: 1000.0, y: 500.0 });
        let set = generate(STANDARD_LENGTH, STANDARD_WIDTH, &placement).unwrap();
        match set.get(MarkingKind::PenaltySpotLeft) {
            Some(MarkingGeometry::Spot(p)) => {
                assert!((p.x - (1000.0 - 34.0)).abs() < 1e-9);
                assert!((p.y - 511.0).abs() < 1e-9);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_sampling_is_tunable() {
        let generator = PitchMarkingGenerator::new(Sampling {
            circle_step_deg: 10.0,
            ..Sampling::default()
        });
        let set = generator
            .generate(STANDARD_LENGTH, STANDARD_WIDTH, &Placement::identity())
            .unwrap();
        assert_eq!(set.get(MarkingKind::CenterCircle).unwrap().points().len(), 36);
    }

    #[test]
    fn test_coarse_penalty_arc_keeps_a_line() {
        let generator = PitchMarkingGenerator::new(Sampling {
            penalty_arc_step_deg: 200.0,
            ..Sampling::default()
        });
        let set = generator
            .generate(STANDARD_LENGTH, STANDARD_WIDTH, &Placement::identity())
            .unwrap();

        for kind in [MarkingKind::PenaltyArcLeft, MarkingKind::PenaltyArcRight] {
            let points = set.get(kind).unwrap().points();
            assert!(points.len() >= 2, "{} has {} points", kind, points.len());
        }
        for record in set.to_records() {
            if record.name.starts_with("penalty_arc") {
                assert!(record.geometry.points().len() >= 2);
            }
        }
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(generate(0.0, 68.0, &Placement::identity()).is_err());
        assert!(generate(105.0, -1.0, &Placement::identity()).is_err());
    }

    #[test]
    fn test_records_close_rings() {
        let records = standard().to_records();
        assert_eq!(records.len(), 15);
        assert_eq!(records[0].name, "boundary");
        assert_eq!(records[0].geometry.points().len(), 5);
    }
}
