pub mod dimensions;
pub mod pitch;
pub mod placement;

pub use dimensions::FieldDimensions;
pub use pitch::{
    MarkingGeometry, MarkingKind, PitchMarking, PitchMarkingGenerator, PitchMarkingSet, Sampling,
    generate,
};
pub use placement::Placement;
