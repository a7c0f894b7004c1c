//! Error types for CDR metadata generation.

use thiserror::Error;

/// Errors that can occur while building CDR metadata.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read NetCDF data: {0}")]
    NetCdf(#[from] netcdf_reader::NetCdfError),

    #[error("Failed to write COG: {0}")]
    Cog(#[from] cogify::CogError),

    #[error("Invalid STAC record: {0}")]
    Stac(#[from] stac_types::StacError),

    #[error("Time handling error: {0}")]
    Time(#[from] cdr_common::TimeParseError),

    #[error("An output directory is required to write new COGs")]
    MissingOutputDirectory,

    #[error("Cannot determine {field} from href: {href}")]
    HrefParse { field: &'static str, href: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CDR metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
