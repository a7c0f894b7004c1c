//! Common types shared across the noaa-cdr-stac crates.

pub mod bbox;
pub mod time;

pub use bbox::BoundingBox;
pub use time::{Iso8601Duration, TimeInterval, TimeParseError};
