//! Annotation of selected blobs
//!
//! Draws each blob's centre marker and bounding box back onto a copy of
//! the input raster for display.

use crate::features::BlobFeatures;
use blobscan_core::Raster;

/// Drawing parameters for [`annotate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Value of the bounding-box outline
    pub box_value: u8,
    /// Value of the centre marker
    pub marker_value: u8,
    /// Half-size of the centre marker squares
    pub marker_half_size: u32,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            box_value: 255,
            marker_value: 0,
            marker_half_size: 3,
        }
    }
}

impl AnnotateOptions {
    /// Set the outline and marker values
    pub fn with_values(mut self, box_value: u8, marker_value: u8) -> Self {
        self.box_value = box_value;
        self.marker_value = marker_value;
        self
    }

    /// Set the marker half-size
    pub fn with_marker_half_size(mut self, half: u32) -> Self {
        self.marker_half_size = half;
        self
    }
}

/// Draw the marker and bounding box of every blob onto a copy of `raster`.
///
/// Markers are drawn first so the boxes stay intact where they cross.
/// Everything is clipped to the raster.
pub fn annotate(raster: &Raster, blobs: &[BlobFeatures], options: &AnnotateOptions) -> Raster {
    let mut out = raster.to_mut();
    for blob in blobs {
        let (cx, cy) = blob.center_point();
        out.draw_marker(cx, cy, options.marker_half_size, options.marker_value);
        if let Some(rect) = blob.bounding_rect() {
            out.draw_rect(&rect, options.box_value);
        }
    }
    out.into()
}
