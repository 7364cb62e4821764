//! Threshold, clean, analyze and select in one call
//!
//! The grayscale front end used for blob detection: the input is
//! binarized at a fixed level, optionally cleaned of isolated spots by a
//! closing or opening, analysed, and the blobs below a size limit are
//! selected and drawn onto a copy of the input.

use crate::analysis::{BlobAnalysis, analyze};
use crate::annotate::{AnnotateOptions, annotate};
use crate::error::{RegionError, RegionResult};
use crate::features::{BlobFeatures, select_blobs};
use crate::options::BlobOptions;
use blobscan_core::{FOREGROUND, Raster};
use blobscan_filter::{ThresholdMode, clean_isolated, threshold};

/// Options for [`process_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobFilterOptions {
    /// Pixels brighter than this become foreground
    pub threshold: u8,
    /// Regions smaller than this are merged into their parents
    pub min_area: u64,
    /// Only blobs smaller than this are selected
    pub max_area: u64,
    /// Closing (positive) or opening (negative) iteration count
    pub open_count: i32,
    /// Whether to apply the closing or opening at all
    pub morphology: bool,
    /// Half-size of the centre markers in the annotated output
    pub marker_half_size: u32,
}

impl Default for BlobFilterOptions {
    fn default() -> Self {
        Self {
            threshold: 100,
            min_area: 500,
            max_area: 2000,
            open_count: 1,
            morphology: true,
            marker_half_size: 3,
        }
    }
}

impl BlobFilterOptions {
    /// Set the threshold level
    pub fn with_threshold(mut self, level: u8) -> Self {
        self.threshold = level;
        self
    }

    /// Set the area range: `min_area` is merged away, `max_area` and above
    /// is not selected
    pub fn with_area_range(mut self, min_area: u64, max_area: u64) -> Self {
        self.min_area = min_area;
        self.max_area = max_area;
        self
    }

    /// Set the closing/opening iteration count
    pub fn with_open_count(mut self, open_count: i32) -> Self {
        self.open_count = open_count;
        self
    }

    /// Enable or disable the closing/opening step
    pub fn with_morphology(mut self, enabled: bool) -> Self {
        self.morphology = enabled;
        self
    }

    /// Set the marker half-size used for annotation
    pub fn with_marker_half_size(mut self, half: u32) -> Self {
        self.marker_half_size = half;
        self
    }
}

/// Output of [`process_image`]
#[derive(Debug, Clone)]
pub struct BlobFilterResult {
    /// Binarized (and cleaned) raster that was analysed
    pub binary: Raster,
    /// Full region table
    pub analysis: BlobAnalysis,
    /// Blobs below the size limit, in region order
    pub blobs: Vec<BlobFeatures>,
    /// Input raster with the selected blobs drawn on it
    pub annotated: Raster,
}

/// Detect blobs in a grayscale raster.
///
/// # Arguments
///
/// * `raster` - 8-bit grayscale input
/// * `options` - Threshold, area range and cleaning parameters
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `min_area > max_area`,
/// and propagates filter and analysis errors.
pub fn process_image(raster: &Raster, options: &BlobFilterOptions) -> RegionResult<BlobFilterResult> {
    if options.min_area > options.max_area {
        return Err(RegionError::InvalidParameters(format!(
            "min_area {} exceeds max_area {}",
            options.min_area, options.max_area
        )));
    }

    let mut binary = threshold(raster, options.threshold, ThresholdMode::Binary)?;
    if options.morphology {
        binary = clean_isolated(&binary, options.open_count)?;
    }

    let blob_options = BlobOptions::default()
        .with_foreground(FOREGROUND)
        .with_min_area(options.min_area);
    let analysis = analyze(&binary, &blob_options)?;
    let blobs = select_blobs(&analysis, options.max_area);
    log::debug!(
        "{} of {} regions selected (area < {})",
        blobs.len(),
        analysis.region_count(),
        options.max_area
    );

    let annotated = annotate(
        raster,
        &blobs,
        &AnnotateOptions::default().with_marker_half_size(options.marker_half_size),
    );

    Ok(BlobFilterResult {
        binary,
        analysis,
        blobs,
        annotated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobscan_core::Rect;

    /// Dark 40x30 field with a bright 10x10 block and a dimmer 3x3 spot
    fn scene() -> Raster {
        let mut raster = Raster::new(40, 30).unwrap().try_into_mut().unwrap();
        raster.set_all(50);
        raster.fill_rect(&Rect::new_unchecked(5, 5, 10, 10), 200);
        raster.fill_rect(&Rect::new_unchecked(30, 20, 3, 3), 150);
        raster.into()
    }

    #[test]
    fn test_defaults() {
        let opts = BlobFilterOptions::default();
        assert_eq!(opts.threshold, 100);
        assert_eq!((opts.min_area, opts.max_area), (500, 2000));
        assert_eq!(opts.open_count, 1);
        assert!(opts.morphology);
        assert_eq!(opts.marker_half_size, 3);
    }

    #[test]
    fn test_small_spot_merged_away() {
        let opts = BlobFilterOptions::default().with_area_range(20, 2000);
        let result = process_image(&scene(), &opts).unwrap();

        assert_eq!(result.binary.count_value(255), 109);
        assert_eq!(result.analysis.region_count(), 1);
        assert_eq!(result.blobs.len(), 1);
        let blob = &result.blobs[0];
        assert_eq!(blob.area, 100);
        assert_eq!(blob.bounding_rect(), Some(Rect::new_unchecked(5, 5, 10, 10)));
        // box drawn on the grayscale input
        assert_eq!(result.annotated.get_pixel(5, 5), Some(255));
        assert_eq!(result.annotated.get_pixel(0, 0), Some(50));
    }

    #[test]
    fn test_max_area_excludes_large_blob() {
        let opts = BlobFilterOptions::default()
            .with_area_range(0, 50)
            .with_morphology(false);
        let result = process_image(&scene(), &opts).unwrap();
        assert_eq!(result.analysis.region_count(), 2);
        assert_eq!(result.blobs.len(), 1);
        assert_eq!(result.blobs[0].area, 9);
    }

    #[test]
    fn test_opening_removes_isolated_pixel() {
        let mut raster = scene().try_into_mut().unwrap();
        raster.set_pixel(25, 3, 255).unwrap();
        let raster: Raster = raster.into();

        let opts = BlobFilterOptions::default()
            .with_area_range(0, 2000)
            .with_open_count(-1);
        let result = process_image(&raster, &opts).unwrap();
        // the 3x3 spot survives one opening, the single pixel does not
        assert_eq!(result.analysis.region_count(), 2);
        assert_eq!(result.binary.get_pixel(25, 3), Some(0));
    }

    #[test]
    fn test_rejects_inverted_area_range() {
        let opts = BlobFilterOptions::default().with_area_range(10, 5);
        assert!(matches!(
            process_image(&scene(), &opts),
            Err(RegionError::InvalidParameters(_))
        ));
    }
}
