//! NetCDF access for climate data records.
//!
//! Wraps the `netcdf` crate with the handful of operations metadata
//! generation needs: global attribute lookups, data-variable discovery,
//! coordinate grids, and per-time-slice reads. Remote hrefs are staged to a
//! temp file first, since libnetcdf only opens file paths.

pub mod dataset;
pub mod error;
pub mod remote;
pub mod variable;

pub use dataset::{Dataset, GeographicGrid};
pub use error::{NetCdfError, NetCdfResult};
pub use remote::{FileSource, ReadHrefModifier};
pub use variable::{DataType, VariableMetadata};
