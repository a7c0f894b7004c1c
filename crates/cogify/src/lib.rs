//! Cloud-optimized GeoTIFF output for climate data slices.
//!
//! Writes single-band float GeoTIFFs with full georeferencing metadata
//! (ModelPixelScale, ModelTiepoint, GeoKeyDirectory, GDAL nodata) using pure
//! Rust, no GDAL dependency.

pub mod error;
pub mod writer;

pub use error::{CogError, CogResult};
pub use writer::{CogWriter, Compression};

use std::path::Path;

/// Find a pre-built COG matching `file_name` among caller-supplied hrefs.
///
/// Matching is by file name only; callers move COGs between directories and
/// still expect them to be reused instead of rewritten.
pub fn find_existing<'a>(cog_hrefs: &'a [String], file_name: &str) -> Option<&'a str> {
    cog_hrefs
        .iter()
        .find(|href| {
            Path::new(href)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n == file_name)
                .unwrap_or(false)
        })
        .map(|href| href.as_str())
}
