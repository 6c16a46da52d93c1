pub mod bounds;
pub mod polygon;
pub mod projection;
pub mod simplify;

pub use bounds::Bounds;
pub use polygon::{FieldPolygon, Point2D};
pub use projection::{PlanarProjection, Projector};
