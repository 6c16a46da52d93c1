use clap::ValueEnum;
use serde::Deserialize;

use crate::coverage::{CoveragePlan, CoveragePlanner, PlannerConfig};
use crate::error::PlanResult;
use crate::export::NamedRecord;
use crate::geometry::FieldPolygon;
use crate::marking::{PitchMarkingGenerator, PitchMarkingSet, Placement, Sampling};

/// What the vehicle is asked to do on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// Headland passes plus interior sweeps
    #[default]
    GrassCutting,
    /// Checkerboard stripes: interior swept twice at right angles
    Striping,
    /// Regulation pitch lines placed on the field
    PitchMarking,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::GrassCutting => "Grass Cutting",
            TaskKind::Striping => "Striping",
            TaskKind::PitchMarking => "Pitch Marking",
        }
    }
}

/// Inputs shared by every task
#[derive(Debug, Clone)]
pub struct TaskParams {
    pub planner: PlannerConfig,
    pub pitch_length: f64,
    pub pitch_width: f64,
    pub sampling: Sampling,
}

#[derive(Debug, Clone)]
pub enum TaskOutput {
    Coverage(CoveragePlan),
    Markings(PitchMarkingSet),
}

impl TaskOutput {
    pub fn to_records(&self) -> Vec<NamedRecord> {
        match self {
            TaskOutput::Coverage(plan) => plan.to_records(),
            TaskOutput::Markings(set) => set.to_records(),
        }
    }
}

/// Run the pipeline selected by `kind`
pub fn run_task(kind: TaskKind, field: &FieldPolygon, params: &TaskParams) -> PlanResult<TaskOutput> {
    match kind {
        TaskKind::GrassCutting => {
            let planner = CoveragePlanner::new(params.planner.clone());
            planner.plan(field).map(TaskOutput::Coverage)
        }
        TaskKind::Striping => {
            let planner = CoveragePlanner::new(params.planner.clone());
            planner.plan_checkerboard(field).map(TaskOutput::Coverage)
        }
        TaskKind::PitchMarking => {
            let placement = Placement::centered_on(field, params.pitch_length, params.pitch_width);
            PitchMarkingGenerator::new(params.sampling)
                .generate(params.pitch_length, params.pitch_width, &placement)
                .map(TaskOutput::Markings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marking::MarkingKind;

    fn params() -> TaskParams {
        TaskParams {
            planner: PlannerConfig::default()
                .with_width(10.0)
                .with_headland_passes(1),
            pitch_length: 105.0,
            pitch_width: 68.0,
            sampling: Sampling::default(),
        }
    }

    fn field() -> FieldPolygon {
        FieldPolygon::from_tuples(&[(0.0, 0.0), (110.0, 0.0), (110.0, 75.0), (0.0, 75.0)]).unwrap()
    }

    #[test]
    fn test_grass_cutting() {
        match run_task(TaskKind::GrassCutting, &field(), &params()).unwrap() {
            TaskOutput::Coverage(plan) => {
                assert_eq!(plan.headland_rings().len(), 1);
                assert!(!plan.sweep_tracks().is_empty());
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_striping_has_more_tracks() {
        let cut = run_task(TaskKind::GrassCutting, &field(), &params()).unwrap();
        let stripe = run_task(TaskKind::Striping, &field(), &params()).unwrap();
        assert!(stripe.to_records().len() > cut.to_records().len());
    }

    #[test]
    fn test_pitch_marking_is_centered() {
        match run_task(TaskKind::PitchMarking, &field(), &params()).unwrap() {
            TaskOutput::Markings(set) => {
                let circle = set.get(MarkingKind::CenterCircle).unwrap().points();
                let n = circle.len() as f64;
                let cx = circle.iter().map(|p| p.x).sum::<f64>() / n;
                let cy = circle.iter().map(|p| p.y).sum::<f64>() / n;
                assert!((cx - 55.0).abs() < 1e-6);
                assert!((cy - 37.5).abs() < 1e-6);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(TaskKind::PitchMarking.label(), "Pitch Marking");
        assert_eq!(TaskKind::default(), TaskKind::GrassCutting);
    }
}
