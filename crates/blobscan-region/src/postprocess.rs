//! Sweeps run once after the last row
//!
//! 1. small regions are merged into their parents,
//! 2. subsumed slots are compacted away (done by the table),
//! 3. moment sums become central moments,
//! 4. each region's perimeter loses the perimeters of the regions nested
//!    in it.

use crate::error::RegionResult;
use crate::region::{Region, RegionId, RegionTable};

/// Merge every live region with `area < min_area` into its parent.
///
/// Regions are visited from the highest number down, so nested regions
/// are resolved before the regions enclosing them. The background is
/// never eliminated.
pub(crate) fn eliminate_small(table: &mut RegionTable, min_area: u64) -> RegionResult<()> {
    if min_area == 0 {
        return Ok(());
    }
    for index in (1..table.len()).rev() {
        let id = RegionId::new(index);
        let region = table.get(id)?;
        if region.subsumed || region.area >= min_area {
            continue;
        }
        let parent = region
            .parent
            .ok_or_else(|| table.consistency(format!("region {} has no parent", id)))?;
        log::trace!(
            "eliminating region {} (area {} < {})",
            id,
            region.area,
            min_area
        );
        table.subsume(id, parent)?;
    }
    Ok(())
}

/// Normalize the moments of every region.
pub(crate) fn normalize_moments(regions: &mut [Region]) {
    for region in regions.iter_mut() {
        region.moments.normalize(region.area);
    }
}

/// Subtract each region's perimeter from its parent's.
///
/// Walks from the highest index down so a region is corrected for its own
/// children before it is subtracted from its parent.
pub(crate) fn subtract_nested_perimeters(regions: &mut [Region]) {
    for index in (1..regions.len()).rev() {
        let perimeter = regions[index].perimeter;
        if let Some(parent) = regions[index].parent {
            regions[parent.index()].perimeter -= perimeter;
        }
    }
}
