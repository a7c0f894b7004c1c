//! Error types for COG writing.

use thiserror::Error;

/// Result type for COG operations.
pub type CogResult<T> = Result<T, CogError>;

#[derive(Error, Debug)]
pub enum CogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF encoding error: {0}")]
    TiffEncode(String),

    #[error("Invalid raster data: {0}")]
    InvalidData(String),
}

impl From<tiff::TiffError> for CogError {
    fn from(e: tiff::TiffError) -> Self {
        CogError::TiffEncode(e.to_string())
    }
}
