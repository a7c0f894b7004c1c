//! The Global Ocean Heat Content CDR.
//!
//! Depth-integrated anomaly time series on a one-degree global grid, one
//! NetCDF file per variable, depth layer, and interval. Each file stacks
//! every record along its time dimension, so item creation first unstacks
//! the records into per-window COGs.

pub mod cog;
pub mod constants;
pub mod stac;

use cdr_common::TimeInterval;

pub use cog::{cogify, Cog};
pub use stac::{create_collection, create_items, CreateItemsOptions};

use crate::error::{Error, Result};

/// File-name token for an interval; pentadal files are named `pentad`.
pub(crate) fn interval_token(interval: TimeInterval) -> &'static str {
    match interval {
        TimeInterval::Pentadal => "pentad",
        other => other.as_str(),
    }
}

/// Parse the maximum depth in meters from the `{top}-{bottom}` token of an
/// href like `heat_content_anomaly_0-2000_yearly.nc`.
pub fn max_depth_from_href(href: &str) -> Result<u32> {
    let stem = crate::stac::file_stem(href)?;
    stem.split('_')
        .find_map(|token| {
            let (top, bottom) = token.split_once('-')?;
            top.parse::<u32>().ok()?;
            bottom.parse::<u32>().ok()
        })
        .ok_or_else(|| Error::HrefParse {
            field: "max depth",
            href: href.to_string(),
        })
}
