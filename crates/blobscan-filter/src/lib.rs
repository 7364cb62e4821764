//! blobscan-filter - Binary preprocessing
//!
//! Turns an arbitrary 8-bit grayscale raster into the two-valued raster
//! expected by the region analysis:
//!
//! - [`threshold`] - fixed-level binarization ([`ThresholdMode`])
//! - [`dilate`] / [`erode`] - 3x3 square morphology with iteration count
//! - [`clean_isolated`] - closing or opening used to remove isolated spots

mod error;
pub mod morph;
pub mod threshold;

pub use error::{FilterError, FilterResult};
pub use morph::{MorphPass, clean_isolated, close, dilate, erode, open};
pub use threshold::{ThresholdMode, threshold};
