//! STAC extension support.

pub mod projection;
pub mod raster;
pub mod scientific;
