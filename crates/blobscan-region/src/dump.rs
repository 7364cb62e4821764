//! Text dump of a region table
//!
//! One line per region in table order, used for inspection and as the
//! golden output of the regression tests.

use crate::analysis::BlobAnalysis;
use crate::region::Region;
use std::fmt;

/// Display adapter printing every region of an analysis
///
/// ```text
/// RegionData array:
/// Region=0: -1 0 108 49 ...
/// Region=1: 0 1 12 14 3.500000 4.000000 1.250000 0.666667 0.000000 2 5 3 5
/// ```
///
/// Fields after the region number: parent (`-1` for the background),
/// colour, area, perimeter, mean x, mean y, variance x, variance y,
/// covariance, min x, max x, min y, max y. The dump ends with an empty
/// line.
pub struct RegionTableDump<'a>(pub &'a BlobAnalysis);

impl fmt::Display for RegionTableDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RegionData array:")?;
        for (id, region) in self.0.iter() {
            write!(f, "Region={}: ", id)?;
            write_region(f, region)?;
            writeln!(f)?;
        }
        writeln!(f)
    }
}

fn write_region(f: &mut fmt::Formatter<'_>, region: &Region) -> fmt::Result {
    let parent = region.parent.map_or(-1, |p| p.index() as i64);
    let m = &region.moments;
    let e = &region.extent;
    write!(
        f,
        "{} {} {} {} {:.6} {:.6} {:.6} {:.6} {:.6} {} {} {} {}",
        parent,
        region.color.code(),
        region.area,
        region.perimeter,
        m.mean_x(),
        m.mean_y(),
        m.var_xx(),
        m.var_yy(),
        m.cov_xy(),
        e.min_x,
        e.max_x,
        e.min_y,
        e.max_y
    )
}

/// Format the whole region table as text.
pub fn format_region_table(analysis: &BlobAnalysis) -> String {
    RegionTableDump(analysis).to_string()
}
