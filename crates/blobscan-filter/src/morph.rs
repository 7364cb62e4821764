//! 3x3 square morphology on two-valued rasters
//!
//! Dilation takes the maximum and erosion the minimum over each pixel's
//! 3x3 neighbourhood. Neighbours outside the raster are ignored, so the
//! image border neither grows nor erodes foreground on its own.
//! Each iteration is applied as a horizontal then a vertical 3-tap pass.

use crate::FilterResult;
use blobscan_core::Raster;

/// A single morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphPass {
    /// Neighbourhood maximum
    Dilate,
    /// Neighbourhood minimum
    Erode,
}

impl MorphPass {
    #[inline]
    fn combine(self, a: u8, b: u8) -> u8 {
        match self {
            MorphPass::Dilate => a.max(b),
            MorphPass::Erode => a.min(b),
        }
    }
}

/// One horizontal + vertical sweep of `pass` over `src`.
fn apply_once(src: &[u8], w: usize, h: usize, pass: MorphPass) -> Vec<u8> {
    let mut tmp = vec![0u8; src.len()];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut tmp[y * w..(y + 1) * w];
        for x in 0..w {
            let mut v = row[x];
            if x > 0 {
                v = pass.combine(v, row[x - 1]);
            }
            if x + 1 < w {
                v = pass.combine(v, row[x + 1]);
            }
            out[x] = v;
        }
    }

    let mut dst = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut v = tmp[y * w + x];
            if y > 0 {
                v = pass.combine(v, tmp[(y - 1) * w + x]);
            }
            if y + 1 < h {
                v = pass.combine(v, tmp[(y + 1) * w + x]);
            }
            dst[y * w + x] = v;
        }
    }
    dst
}

/// Apply `pass` `iterations` times.
pub fn apply(raster: &Raster, pass: MorphPass, iterations: u32) -> FilterResult<Raster> {
    if iterations == 0 {
        return Ok(raster.clone());
    }
    let w = raster.width() as usize;
    let h = raster.height() as usize;
    let mut data = raster.data().to_vec();
    for _ in 0..iterations {
        data = apply_once(&data, w, h, pass);
    }
    Ok(Raster::from_data(raster.width(), raster.height(), data)?)
}

/// Dilate with a 3x3 square element, `iterations` times.
pub fn dilate(raster: &Raster, iterations: u32) -> FilterResult<Raster> {
    apply(raster, MorphPass::Dilate, iterations)
}

/// Erode with a 3x3 square element, `iterations` times.
pub fn erode(raster: &Raster, iterations: u32) -> FilterResult<Raster> {
    apply(raster, MorphPass::Erode, iterations)
}

/// Closing: dilate then erode, each `iterations` times.
pub fn close(raster: &Raster, iterations: u32) -> FilterResult<Raster> {
    let dilated = dilate(raster, iterations)?;
    erode(&dilated, iterations)
}

/// Opening: erode then dilate, each `iterations` times.
pub fn open(raster: &Raster, iterations: u32) -> FilterResult<Raster> {
    let eroded = erode(raster, iterations)?;
    dilate(&eroded, iterations)
}

/// Remove isolated spots before region analysis.
///
/// A positive `open_count` closes the image (fills small holes and
/// bridges narrow gaps); a negative one opens it with `-open_count`
/// iterations (removes small specks). Zero returns the input unchanged.
pub fn clean_isolated(raster: &Raster, open_count: i32) -> FilterResult<Raster> {
    let iterations = open_count.unsigned_abs();
    log::trace!(
        "clean_isolated: {} x{}",
        if open_count > 0 { "close" } else { "open" },
        iterations
    );
    match open_count {
        0 => Ok(raster.clone()),
        n if n > 0 => close(raster, iterations),
        _ => open(raster, iterations),
    }
}
