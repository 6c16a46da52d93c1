pub mod record;
pub mod writer;

pub use record::{NamedRecord, RecordGeometry};
pub use writer::{to_feature_collection, write_geojson};
