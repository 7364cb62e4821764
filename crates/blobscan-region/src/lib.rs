//! blobscan-region - Single-pass connected region analysis
//!
//! Finds every 4-connected region of a two-valued raster in one top to
//! bottom scan, without labeling pixels:
//!
//! - **Transition extraction** - each row is reduced to the columns where
//!   its colour changes ([`TransitionRow`])
//! - **Row reconciliation** - runs of consecutive rows are matched in
//!   lockstep ([`AdjacencyCase`]); regions found to be one shape are merged
//! - **Post-processing** - small regions are merged into their parents,
//!   moments are centred and nested perimeters subtracted
//! - **Reporting** - text dump, per-blob features, annotation and the
//!   grayscale detection pipeline
//!
//! # Examples
//!
//! ```
//! use blobscan_core::{Raster, Rect};
//! use blobscan_region::{BlobOptions, RegionColor, analyze};
//!
//! // A ring: 5x5 block with a one-pixel hole
//! let mut raster = Raster::new(9, 9).unwrap().try_into_mut().unwrap();
//! raster.fill_rect(&Rect::new_unchecked(2, 2, 5, 5), 255);
//! raster.set_pixel(4, 4, 0).unwrap();
//! let raster: Raster = raster.into();
//!
//! let analysis = analyze(&raster, &BlobOptions::default()).unwrap();
//! assert_eq!(analysis.region_count(), 2);
//!
//! let ring = &analysis.blobs()[0];
//! assert_eq!(ring.area, 24);
//! let hole = &analysis.blobs()[1];
//! assert_eq!(hole.color, RegionColor::Background);
//! assert_eq!(hole.area, 1);
//! ```

pub mod analysis;
pub mod annotate;
pub mod dump;
pub mod error;
pub mod features;
pub mod options;
pub mod pipeline;
mod postprocess;
pub mod reconcile;
pub mod region;
pub mod transition;

// Re-export core types
pub use blobscan_core;

pub use analysis::{BlobAnalysis, analyze};
pub use annotate::{AnnotateOptions, annotate};
pub use dump::{RegionTableDump, format_region_table};
pub use error::{RegionError, RegionResult};
pub use features::{BlobFeatures, select_blobs};
pub use options::{BlobOptions, DEFAULT_MAX_COLS, DEFAULT_MAX_REGIONS, DEFAULT_MAX_ROWS};
pub use pipeline::{BlobFilterOptions, BlobFilterResult, process_image};
pub use reconcile::AdjacencyCase;
pub use region::{Extent, Moments, Region, RegionColor, RegionId};
pub use transition::{Run, TransitionRow};
