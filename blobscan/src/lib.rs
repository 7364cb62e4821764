//! Blobscan - Connected region analysis for Rust
//!
//! Finds the connected regions ("blobs") of a binary raster in a single
//! top to bottom pass, reporting for each region its enclosing parent,
//! area, perimeter, spatial moments and bounding box.
//!
//! # Overview
//!
//! - Raster container and drawing ([`Raster`], [`Rect`])
//! - Image I/O (PNG, PGM) in [`io`]
//! - Thresholding and 3x3 morphology in [`filter`]
//! - Region analysis, dumps, blob features and annotation in [`region`]
//!
//! # Example
//!
//! ```
//! use blobscan::Raster;
//! use blobscan::region::{BlobFilterOptions, process_image};
//!
//! // Dark 32x32 image with one bright 6x6 square
//! let mut raster = Raster::new(32, 32).unwrap().try_into_mut().unwrap();
//! raster.set_all(20);
//! for y in 10..16 {
//!     raster.row_mut(y)[10..16].fill(200);
//! }
//! let raster: Raster = raster.into();
//!
//! let options = BlobFilterOptions::default().with_area_range(10, 100);
//! let result = process_image(&raster, &options).unwrap();
//! assert_eq!(result.blobs.len(), 1);
//! assert_eq!(result.blobs[0].area, 36);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use blobscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use blobscan_filter as filter;
pub use blobscan_io as io;
pub use blobscan_region as region;
