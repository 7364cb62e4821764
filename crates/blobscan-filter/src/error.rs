//! Error types for blobscan-filter

use thiserror::Error;

/// Errors that can occur during preprocessing
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for preprocessing operations
pub type FilterResult<T> = Result<T, FilterError>;
