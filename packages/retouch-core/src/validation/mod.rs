pub mod params;

pub use params::{parse_coordinate, parse_rect, validate_source_dimensions};
