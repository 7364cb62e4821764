//! Error types for blobscan-region

use thiserror::Error;

/// Errors that can occur during region analysis
///
/// None of these are recoverable within a single analysis call: when one
/// is returned no region table is produced.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),

    /// Preprocessing error
    #[error("filter error: {0}")]
    Filter(#[from] blobscan_filter::FilterError),

    /// Image is larger than the configured working table
    #[error("image {width}x{height} exceeds working table {max_cols}x{max_rows}")]
    Dimension {
        width: u32,
        height: u32,
        max_cols: u32,
        max_rows: u32,
    },

    /// The reconciler reached a state its case logic cannot produce.
    ///
    /// `row` is the bordered scan row (1 = first image row).
    #[error("internal consistency error at row {row}: {detail}")]
    InternalConsistency { row: u32, detail: String },

    /// More regions were allocated than the table can hold
    #[error("region table capacity exceeded ({capacity} regions)")]
    CapacityExceeded { capacity: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
