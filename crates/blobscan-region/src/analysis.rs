//! Single-pass region analysis
//!
//! [`analyze`] scans a raster top to bottom, one row pair at a time, and
//! produces the table of every 4-connected region of both colours. The
//! image is treated as if surrounded by a one-pixel background frame, so
//! region 0 is always the outer background and every other region has an
//! enclosing parent.

use crate::error::{RegionError, RegionResult};
use crate::options::BlobOptions;
use crate::postprocess::{eliminate_small, normalize_moments, subtract_nested_perimeters};
use crate::reconcile::reconcile_row;
use crate::region::{Region, RegionId, RegionTable};
use crate::transition::TransitionRow;
use blobscan_core::Raster;

/// Result of [`analyze`]
///
/// Regions are numbered densely from 0. Region 0 is the outer
/// background; regions `1..=region_count()` are the blobs and holes found
/// in the image.
#[derive(Debug, Clone)]
pub struct BlobAnalysis {
    width: u32,
    height: u32,
    regions: Vec<Region>,
}

impl BlobAnalysis {
    /// Width of the analysed image
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the analysed image
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Highest region number; 0 when the image holds only background
    pub fn region_count(&self) -> usize {
        self.regions.len() - 1
    }

    /// All regions, background first
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All regions except the outer background
    pub fn blobs(&self) -> &[Region] {
        &self.regions[1..]
    }

    /// Get a region by handle
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Iterate over `(handle, region)` pairs, background first
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId::new(i), r))
    }
}

/// Find all connected regions of a raster.
///
/// A pixel equal to `options.foreground` has colour 1, every other pixel
/// colour 0. Regions of either colour are reported, each with its
/// immediately enclosing parent, area, perimeter, central moments and
/// bounding box.
///
/// # Arguments
///
/// * `raster` - Input raster
/// * `options` - Foreground value, minimum area and table bounds
///
/// # Returns
///
/// The complete region table. Regions whose area is below
/// `options.min_area` have been merged into their parents.
///
/// # Errors
///
/// - [`RegionError::Dimension`] if the raster exceeds `max_cols` x `max_rows`
/// - [`RegionError::CapacityExceeded`] if more than `max_regions` regions
///   are allocated during the scan
/// - [`RegionError::InternalConsistency`] if the row walk reaches an
///   impossible state
///
/// # Examples
///
/// ```
/// use blobscan_core::Raster;
/// use blobscan_region::{BlobOptions, analyze};
///
/// let mut raster = Raster::new(6, 5).unwrap().try_into_mut().unwrap();
/// raster.set_pixel(2, 2, 255).unwrap();
/// raster.set_pixel(3, 2, 255).unwrap();
/// let raster: Raster = raster.into();
///
/// let analysis = analyze(&raster, &BlobOptions::default()).unwrap();
/// assert_eq!(analysis.region_count(), 1);
/// assert_eq!(analysis.blobs()[0].area, 2);
/// ```
pub fn analyze(raster: &Raster, options: &BlobOptions) -> RegionResult<BlobAnalysis> {
    options.validate()?;
    let (width, height) = (raster.width(), raster.height());
    if width > options.max_cols || height > options.max_rows {
        return Err(RegionError::Dimension {
            width,
            height,
            max_cols: options.max_cols,
            max_rows: options.max_rows,
        });
    }

    let mut table = RegionTable::new(width, options.max_regions);
    let mut last = TransitionRow::border(width);
    let mut last_regions = vec![Some(RegionId::BACKGROUND)];

    // Bordered rows 1..=height are the image; height + 1 is the bottom frame.
    for row in 1..=height + 1 {
        table.row = row;
        let this = if row <= height {
            TransitionRow::from_pixels(raster.row(row - 1), options.foreground)
        } else {
            TransitionRow::border(width)
        };
        let this_regions = reconcile_row(
            &mut table,
            &last,
            &mut last_regions,
            &this,
            row as i64 - 1,
        )?;
        last = this;
        last_regions = this_regions;
    }

    eliminate_small(&mut table, options.min_area)?;
    let mut regions = table.into_compacted()?;
    normalize_moments(&mut regions);
    subtract_nested_perimeters(&mut regions);

    log::debug!(
        "analyzed {}x{} raster: {} regions (min_area {})",
        width,
        height,
        regions.len() - 1,
        options.min_area
    );

    Ok(BlobAnalysis {
        width,
        height,
        regions,
    })
}
