//! Region descriptors and the region table
//!
//! The table owns every region allocated during a scan. Slots are never
//! removed while scanning: a region merged into another is only flagged
//! as subsumed, so parent references to it can still be redirected.
//! Compaction into the final, dense list happens after the scan.

use crate::error::{RegionError, RegionResult};
use crate::transition::Run;
use blobscan_core::Rect;
use std::fmt;

/// Handle of a region in a region table
///
/// Index 0 is always the outer background region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(usize);

impl RegionId {
    /// The outer background region, which includes the one-pixel frame
    /// around the image.
    pub const BACKGROUND: RegionId = RegionId(0);

    /// Create a handle from a table index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Table index of this region
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colour of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionColor {
    /// Pixels not equal to the foreground value
    #[default]
    Background,
    /// Pixels equal to the foreground value
    Foreground,
}

impl RegionColor {
    /// Numeric colour code (0 or 1)
    pub fn code(self) -> u8 {
        match self {
            RegionColor::Background => 0,
            RegionColor::Foreground => 1,
        }
    }
}

/// Spatial moment accumulators
///
/// During the scan the fields hold raw sums over the region's pixels.
/// [`Moments::normalize`] turns them into means, variances and covariance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Σx, then mean x
    pub sum_x: f64,
    /// Σy, then mean y
    pub sum_y: f64,
    /// Σx², then variance of x
    pub sum_xx: f64,
    /// Σy², then variance of y
    pub sum_yy: f64,
    /// Σxy, then covariance
    pub sum_xy: f64,
    centered: bool,
}

/// Σ k² for k in 0..=x, extended to negative `x` so that
/// `square_prefix(b) - square_prefix(a - 1)` is Σ k² over `a..=b`.
fn square_prefix(x: i128) -> i128 {
    x * (x + 1) * (2 * x + 1) / 6
}

/// Covariances smaller than this are round-off and reported as zero.
const COVARIANCE_EPSILON: f64 = 1e-14;

impl Moments {
    /// Add the horizontal run `x0..=x1` on row `y` (image coordinates).
    pub(crate) fn add_run(&mut self, x0: i64, x1: i64, y: i64) {
        let (x0, x1, y) = (x0 as i128, x1 as i128, y as i128);
        let n = x1 - x0 + 1;
        let sx = (x0 + x1) * n / 2;
        let sxx = square_prefix(x1) - square_prefix(x0 - 1);
        self.sum_x += sx as f64;
        self.sum_xx += sxx as f64;
        self.sum_xy += (sx * y) as f64;
        self.sum_y += (n * y) as f64;
        self.sum_yy += (n * y * y) as f64;
    }

    pub(crate) fn merge(&mut self, other: &Moments) {
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.sum_xx += other.sum_xx;
        self.sum_yy += other.sum_yy;
        self.sum_xy += other.sum_xy;
    }

    /// Convert raw sums into central moments for a region of `area` pixels.
    ///
    /// Running it again on normalized moments changes nothing.
    pub fn normalize(&mut self, area: u64) {
        if self.centered || area == 0 {
            return;
        }
        let a = area as f64;
        self.sum_x /= a;
        self.sum_y /= a;
        self.sum_xx /= a;
        self.sum_yy /= a;
        self.sum_xy /= a;
        self.sum_xx -= self.sum_x * self.sum_x;
        self.sum_yy -= self.sum_y * self.sum_y;
        self.sum_xy -= self.sum_x * self.sum_y;
        if self.sum_xy.abs() < COVARIANCE_EPSILON {
            self.sum_xy = 0.0;
        }
        self.centered = true;
    }

    /// Whether [`Moments::normalize`] has been applied
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Mean x coordinate (after normalization)
    pub fn mean_x(&self) -> f64 {
        self.sum_x
    }

    /// Mean y coordinate (after normalization)
    pub fn mean_y(&self) -> f64 {
        self.sum_y
    }

    /// Variance of x (after normalization)
    pub fn var_xx(&self) -> f64 {
        self.sum_xx
    }

    /// Variance of y (after normalization)
    pub fn var_yy(&self) -> f64 {
        self.sum_yy
    }

    /// Covariance of x and y (after normalization)
    pub fn cov_xy(&self) -> f64 {
        self.sum_xy
    }
}

/// Inclusive bounding extent of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    /// An extent that contains nothing; widening it by any point sets it.
    pub const EMPTY: Extent = Extent {
        min_x: i64::MAX,
        max_x: i64::MIN,
        min_y: i64::MAX,
        max_y: i64::MIN,
    };

    /// True until a pixel has been attributed
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Widen to include the run `x0..=x1` on row `y`.
    ///
    /// The left frame column (x = -1) is clamped to 0.
    pub(crate) fn include_run(&mut self, x0: i64, x1: i64, y: i64) {
        self.min_x = self.min_x.min(x0.max(0));
        self.max_x = self.max_x.max(x1);
        self.min_y = self.min_y.min(y.max(0));
        self.max_y = self.max_y.max(y);
    }

    pub(crate) fn merge(&mut self, other: &Extent) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Bounding rectangle, or `None` for an empty extent
    pub fn to_rect(&self) -> Option<Rect> {
        Rect::from_extent(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// A connected region of uniform colour
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Immediately enclosing region; `None` only for the background
    pub parent: Option<RegionId>,
    /// Region colour
    pub color: RegionColor,
    /// Pixel count
    pub area: u64,
    /// Boundary length, excluding the boundaries of enclosed regions
    pub perimeter: i64,
    /// Spatial moments
    pub moments: Moments,
    /// Bounding extent
    pub extent: Extent,
    pub(crate) subsumed: bool,
}

impl Region {
    fn new(color: RegionColor, parent: Option<RegionId>) -> Self {
        Self {
            parent,
            color,
            area: 0,
            perimeter: 0,
            moments: Moments::default(),
            extent: Extent::EMPTY,
            subsumed: false,
        }
    }

    /// Bounding rectangle in image coordinates
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.extent.to_rect()
    }

    /// Attribute the pixels of `run` on image row `y`.
    ///
    /// `overlap` is the number of columns where the run touches a run of
    /// the same region in the row above. Those edges were counted as the
    /// bottom of the upper run and would be counted again as the top of
    /// this one, so both counts are removed.
    fn absorb_run(&mut self, run: &Run, y: i64, overlap: i64) {
        let (x0, x1) = run.image_span();
        let n = run.len();
        self.area += n as u64;
        self.perimeter += 2 + 2 * n - 2 * overlap;
        self.moments.add_run(x0, x1, y);
        self.extent.include_run(x0, x1, y);
    }
}

/// Fixed-capacity table of regions
#[derive(Debug)]
pub(crate) struct RegionTable {
    regions: Vec<Region>,
    capacity: usize,
    /// Bordered scan row, reported in consistency errors
    pub(crate) row: u32,
}

impl RegionTable {
    /// Create a table holding the background region.
    ///
    /// The background starts with the synthetic row above the image:
    /// `cols + 2` pixels, bounded by both its sides and its ends.
    pub(crate) fn new(cols: u32, capacity: usize) -> Self {
        let top = cols as i64 + 2;
        let mut background = Region::new(RegionColor::Background, None);
        background.area = top as u64;
        background.perimeter = 2 + 2 * top;
        let mut regions = Vec::with_capacity(capacity.min(1024));
        regions.push(background);
        Self {
            regions,
            capacity,
            row: 0,
        }
    }

    pub(crate) fn consistency(&self, detail: impl Into<String>) -> RegionError {
        RegionError::InternalConsistency {
            row: self.row,
            detail: detail.into(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.regions.len()
    }

    pub(crate) fn get(&self, id: RegionId) -> RegionResult<&Region> {
        self.regions
            .get(id.0)
            .ok_or_else(|| self.consistency(format!("region {} not allocated", id)))
    }

    pub(crate) fn get_mut(&mut self, id: RegionId) -> RegionResult<&mut Region> {
        let row = self.row;
        self.regions
            .get_mut(id.0)
            .ok_or_else(|| RegionError::InternalConsistency {
                row,
                detail: format!("region {} not allocated", id),
            })
    }

    /// Allocate a region for `run`, nested in `parent`.
    pub(crate) fn allocate(&mut self, run: &Run, y: i64, parent: RegionId) -> RegionResult<RegionId> {
        if self.regions.len() >= self.capacity {
            return Err(RegionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let id = RegionId(self.regions.len());
        let mut region = Region::new(run.color, Some(parent));
        region.absorb_run(run, y, 0);
        self.regions.push(region);
        Ok(id)
    }

    /// Attribute `run` to the existing region `id`.
    pub(crate) fn extend(&mut self, id: RegionId, run: &Run, y: i64, overlap: i64) -> RegionResult<()> {
        self.get_mut(id)?.absorb_run(run, y, overlap);
        Ok(())
    }

    /// Merge region `dying` into `surviving`.
    ///
    /// Sums area, perimeter and moments, widens the extent, redirects
    /// every child of `dying` to `surviving` and marks `dying` subsumed.
    /// The background can never die.
    pub(crate) fn subsume(&mut self, dying: RegionId, surviving: RegionId) -> RegionResult<()> {
        if dying == RegionId::BACKGROUND || dying == surviving {
            return Err(self.consistency(format!(
                "cannot subsume region {} into {}",
                dying, surviving
            )));
        }
        let dead = self.get(dying)?.clone();
        let survivor = self.get_mut(surviving)?;
        survivor.area += dead.area;
        survivor.perimeter += dead.perimeter;
        survivor.moments.merge(&dead.moments);
        survivor.extent.merge(&dead.extent);

        for region in &mut self.regions {
            if region.parent == Some(dying) {
                region.parent = Some(surviving);
            }
        }
        self.regions[dying.0].subsumed = true;
        log::trace!("subsuming region {} into {}", dying, surviving);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Drop subsumed slots, renumbering survivors in ascending order.
    pub(crate) fn into_compacted(self) -> RegionResult<Vec<Region>> {
        let row = self.row;
        let mut remap = vec![None; self.regions.len()];
        let mut next = 0;
        for (old, region) in self.regions.iter().enumerate() {
            if !region.subsumed {
                remap[old] = Some(RegionId(next));
                next += 1;
            }
        }

        let mut live = Vec::with_capacity(next);
        for mut region in self.regions.into_iter().filter(|r| !r.subsumed) {
            region.parent = match region.parent {
                Some(p) => Some(remap[p.0].ok_or_else(|| RegionError::InternalConsistency {
                    row,
                    detail: format!("live region has subsumed parent {}", p),
                })?),
                None => None,
            };
            live.push(region);
        }
        Ok(live)
    }
}
