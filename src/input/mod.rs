pub mod parser;

pub use parser::{DEFAULT_FIELD, field_from_geodetic, parse_coordinates};
