pub mod direction;
pub mod offset;
pub mod path;
pub mod planner;
pub mod sweep;

pub use direction::DirectionSpec;
pub use offset::{headland_rings, inner_working_polygon, inward_offset};
pub use path::{CoveragePlan, LineSegmentPath};
pub use planner::{CoveragePlanner, PlannerConfig, plan};
pub use sweep::sweep_tracks;
