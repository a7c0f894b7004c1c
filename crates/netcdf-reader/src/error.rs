//! Error types for NetCDF reading operations.

use thiserror::Error;

/// Result type for NetCDF reader operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required variable, dimension, or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Remote file could not be fetched
    #[error("Failed to fetch {href}: {message}")]
    Fetch { href: String, message: String },
}
