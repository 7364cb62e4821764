//! Blob features and size selection
//!
//! Flattens the regions of an analysis into the per-blob records used by
//! downstream shape matching, keeping only blobs below a size limit.

use crate::analysis::BlobAnalysis;
use crate::region::{Region, RegionId};
use blobscan_core::Rect;

/// Summary of one selected blob
#[derive(Debug, Clone, PartialEq)]
pub struct BlobFeatures {
    /// Region the features were taken from
    pub region: RegionId,
    /// Pixel count
    pub area: u64,
    /// Boundary length
    pub perimeter: i64,
    /// Leftmost column
    pub min_x: i64,
    /// Top row
    pub min_y: i64,
    /// Rightmost column
    pub max_x: i64,
    /// Bottom row
    pub max_y: i64,
    /// Centre of the bounding box
    pub centroid: (f64, f64),
    /// Area divided by the bounding-box diagonal; 0 for a single pixel
    pub rectangularity: f64,
}

impl BlobFeatures {
    /// Extract the features of `region`.
    pub fn from_region(id: RegionId, region: &Region) -> Self {
        let e = &region.extent;
        let diagonal = region
            .bounding_rect()
            .map_or(0.0, |rect| rect.corner_diagonal());
        let rectangularity = if diagonal > 0.0 {
            region.area as f64 / diagonal
        } else {
            0.0
        };
        Self {
            region: id,
            area: region.area,
            perimeter: region.perimeter,
            min_x: e.min_x,
            min_y: e.min_y,
            max_x: e.max_x,
            max_y: e.max_y,
            centroid: (
                (e.min_x + e.max_x) as f64 / 2.0,
                (e.min_y + e.max_y) as f64 / 2.0,
            ),
            rectangularity,
        }
    }

    /// Bounding rectangle in image coordinates
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_extent(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Integer centre used for drawing markers
    pub fn center_point(&self) -> (i32, i32) {
        (
            ((self.min_x + self.max_x) / 2) as i32,
            ((self.min_y + self.max_y) / 2) as i32,
        )
    }
}

/// Select the blobs with `area < max_area`, in region order.
///
/// The background region is never selected.
pub fn select_blobs(analysis: &BlobAnalysis, max_area: u64) -> Vec<BlobFeatures> {
    analysis
        .iter()
        .skip(1)
        .filter(|(_, region)| region.area < max_area)
        .map(|(id, region)| BlobFeatures::from_region(id, region))
        .collect()
}
