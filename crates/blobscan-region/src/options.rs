//! Analysis options

use crate::error::{RegionError, RegionResult};
use blobscan_core::FOREGROUND;

/// Default maximum image width accepted by [`crate::analyze`]
pub const DEFAULT_MAX_COLS: u32 = 1000;
/// Default maximum image height accepted by [`crate::analyze`]
pub const DEFAULT_MAX_ROWS: u32 = 1000;
/// Default region table capacity, including the background region
pub const DEFAULT_MAX_REGIONS: usize = 8000;

/// Options for [`crate::analyze`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobOptions {
    /// Pixel value treated as foreground; every other value is background
    pub foreground: u8,
    /// Regions with a smaller final area are merged into their parent
    pub min_area: u64,
    /// Maximum image width
    pub max_cols: u32,
    /// Maximum image height
    pub max_rows: u32,
    /// Maximum number of regions allocated during the scan
    pub max_regions: usize,
}

impl Default for BlobOptions {
    fn default() -> Self {
        Self {
            foreground: FOREGROUND,
            min_area: 0,
            max_cols: DEFAULT_MAX_COLS,
            max_rows: DEFAULT_MAX_ROWS,
            max_regions: DEFAULT_MAX_REGIONS,
        }
    }
}

impl BlobOptions {
    /// Set the foreground value
    pub fn with_foreground(mut self, value: u8) -> Self {
        self.foreground = value;
        self
    }

    /// Set the minimum region area
    pub fn with_min_area(mut self, min_area: u64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Set the maximum accepted image size
    pub fn with_max_dimensions(mut self, max_cols: u32, max_rows: u32) -> Self {
        self.max_cols = max_cols;
        self.max_rows = max_rows;
        self
    }

    /// Set the region table capacity
    pub fn with_max_regions(mut self, max_regions: usize) -> Self {
        self.max_regions = max_regions;
        self
    }

    pub(crate) fn validate(&self) -> RegionResult<()> {
        if self.max_regions == 0 {
            return Err(RegionError::InvalidParameters(
                "max_regions must hold at least the background region".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = BlobOptions::default();
        assert_eq!(opts.foreground, 255);
        assert_eq!(opts.min_area, 0);
        assert_eq!(opts.max_cols, 1000);
        assert_eq!(opts.max_rows, 1000);
        assert_eq!(opts.max_regions, 8000);
    }

    #[test]
    fn test_builders() {
        let opts = BlobOptions::default()
            .with_foreground(1)
            .with_min_area(20)
            .with_max_dimensions(64, 32)
            .with_max_regions(10);
        assert_eq!(opts.foreground, 1);
        assert_eq!(opts.min_area, 20);
        assert_eq!((opts.max_cols, opts.max_rows), (64, 32));
        assert_eq!(opts.max_regions, 10);
        assert!(opts.validate().is_ok());
        assert!(BlobOptions::default().with_max_regions(0).validate().is_err());
    }
}
