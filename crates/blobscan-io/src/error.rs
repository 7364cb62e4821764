//! Errors of the io crate
//!
//! Codec errors are flattened to strings so callers see a single type.

use thiserror::Error;

/// Failure while reading or writing a raster
#[derive(Error, Debug)]
pub enum IoError {
    /// Filesystem or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Format not recognised, or its feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Header or sample data that cannot be a valid image
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// Codec rejected the input
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Codec failed while writing
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded dimensions rejected by the raster constructor
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),
}

/// Result of an io operation
pub type IoResult<T> = Result<T, IoError>;
