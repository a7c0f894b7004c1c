//! Serde data model for SpatioTemporal Asset Catalog (STAC) records.
//!
//! Covers the subset of STAC 1.0.0 needed to describe climate data records:
//! Items, Collections, Assets, Links, and the raster, projection, and
//! scientific extensions.

pub mod asset;
pub mod collection;
pub mod extensions;
pub mod item;
pub mod link;
pub mod media_type;

pub use asset::Asset;
pub use collection::{Collection, Extent, ItemAsset, Provider, SpatialExtent, TemporalExtent};
pub use item::{Item, Properties};
pub use link::Link;

/// The STAC specification version this model targets.
pub const STAC_VERSION: &str = "1.0.0";

/// Errors raised when a record violates a STAC invariant.
#[derive(Debug, thiserror::Error)]
pub enum StacError {
    #[error("Item {0} must have either datetime or both start_datetime and end_datetime")]
    MissingDatetime(String),

    #[error("Invalid bbox for {id}: expected 4 or 6 values, got {len}")]
    InvalidBbox { id: String, len: usize },

    #[error("Record must have a non-empty id (href: {0})")]
    EmptyId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
