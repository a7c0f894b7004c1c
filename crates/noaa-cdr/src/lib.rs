//! STAC metadata generation for NOAA Climate Data Records.
//!
//! Climate Data Records (CDRs) are long-term, consistently processed
//! scientific datasets distributed as NetCDF files. This crate reads those
//! files and emits STAC Items and Collections, optionally converting data
//! slices to cloud-optimized GeoTIFFs.
//!
//! Each supported CDR gets its own module with `create_collection`,
//! item-creation, and `cogify` operations; the shared attribute-to-item
//! mapping lives in [`stac`].

pub mod constants;
pub mod error;
pub mod ocean_heat_content;
pub mod sea_ice_concentration;
pub mod stac;

pub use error::{Error, Result};
pub use stac::{create_item, CreateItemOptions};
