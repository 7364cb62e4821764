//! Fixed-level thresholding

use crate::FilterResult;
use blobscan_core::{BACKGROUND, FOREGROUND, Raster};

/// How pixels above the threshold are mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMode {
    /// `pixel > level` becomes foreground, everything else background
    #[default]
    Binary,
    /// `pixel > level` becomes background, everything else foreground
    BinaryInverse,
}

/// Binarize a grayscale raster at a fixed level.
///
/// # Arguments
///
/// * `raster` - 8-bit grayscale input
/// * `level` - Threshold; the comparison is strictly greater-than
/// * `mode` - Whether bright pixels become foreground or background
///
/// # Returns
///
/// A raster containing only [`FOREGROUND`] (255) and [`BACKGROUND`] (0).
pub fn threshold(raster: &Raster, level: u8, mode: ThresholdMode) -> FilterResult<Raster> {
    let (above, below) = match mode {
        ThresholdMode::Binary => (FOREGROUND, BACKGROUND),
        ThresholdMode::BinaryInverse => (BACKGROUND, FOREGROUND),
    };
    let data = raster
        .data()
        .iter()
        .map(|&p| if p > level { above } else { below })
        .collect();
    Ok(Raster::from_data(raster.width(), raster.height(), data)?)
}
