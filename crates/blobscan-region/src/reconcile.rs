//! Row-pair reconciliation
//!
//! Walks the runs of the previous row and the current row in lockstep.
//! Each step classifies the pair of runs under the two cursors into one of
//! eight adjacency cases, which decides whether the current run inherits
//! the region above it, starts a new region nested in it, or reveals that
//! two regions are the same shape and must be merged. Every step advances
//! at least one cursor.

use crate::error::RegionResult;
use crate::region::{RegionId, RegionTable};
use crate::transition::{Run, TransitionRow};

/// Topological relation of a previous-row run and a current-row run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyCase {
    /// Previous run ends left of the current run without touching it
    PreviousBefore,
    /// Previous run starts further left, current run extends further right
    OverlapRight,
    /// Previous run contains the current run and extends further right
    Contained,
    /// Previous run starts further left, both end in the same column
    ContainedEndAligned,
    /// Current run starts at or before the previous run, ends aligned
    EndAligned,
    /// Current run contains the previous run and extends further right
    Covering,
    /// Current run starts at or before the previous run, ends before it
    OverlapLeft,
    /// Current run ends left of the previous run without touching it
    CurrentBefore,
}

impl AdjacencyCase {
    /// Classify a pair of runs.
    ///
    /// With `ls..=le` the previous run and `ts..=te` the current run:
    ///
    /// | predicate | meaning |
    /// |---|---|
    /// | A | `le < ts - 1` |
    /// | B | `te < ls` |
    /// | C | `ls < ts` |
    /// | D | `te < le` |
    /// | E | `te == le` |
    ///
    /// The first matching rule wins: A, then B, then the C split on D/E,
    /// then the not-C split on E/D.
    pub fn classify(last: &Run, this: &Run) -> Self {
        let (ls, le, ts, te) = (last.start, last.end, this.start, this.end);
        if le < ts - 1 {
            AdjacencyCase::PreviousBefore
        } else if te < ls {
            AdjacencyCase::CurrentBefore
        } else if ls < ts {
            if te < le {
                AdjacencyCase::Contained
            } else if te != le {
                AdjacencyCase::OverlapRight
            } else {
                AdjacencyCase::ContainedEndAligned
            }
        } else if te == le {
            AdjacencyCase::EndAligned
        } else if te < le {
            AdjacencyCase::OverlapLeft
        } else {
            AdjacencyCase::Covering
        }
    }

    /// Case number 1-8 as used in diagnostics
    pub fn number(self) -> u8 {
        match self {
            AdjacencyCase::PreviousBefore => 1,
            AdjacencyCase::OverlapRight => 2,
            AdjacencyCase::Contained => 3,
            AdjacencyCase::ContainedEndAligned => 4,
            AdjacencyCase::EndAligned => 5,
            AdjacencyCase::Covering => 6,
            AdjacencyCase::OverlapLeft => 7,
            AdjacencyCase::CurrentBefore => 8,
        }
    }

    /// Whether the previous-row cursor moves past its run
    fn advances_last(self) -> bool {
        matches!(
            self,
            AdjacencyCase::PreviousBefore
                | AdjacencyCase::OverlapRight
                | AdjacencyCase::ContainedEndAligned
                | AdjacencyCase::EndAligned
                | AdjacencyCase::Covering
        )
    }

    /// Whether the current-row cursor moves past its run
    fn advances_this(self) -> bool {
        matches!(
            self,
            AdjacencyCase::Contained
                | AdjacencyCase::ContainedEndAligned
                | AdjacencyCase::EndAligned
                | AdjacencyCase::OverlapLeft
                | AdjacencyCase::CurrentBefore
        )
    }
}

/// Region assignment of each run of a row
pub(crate) type RowRegions = Vec<Option<RegionId>>;

/// Merge the regions `a` and `b`, returning the survivor.
///
/// The higher-numbered region always dies, so merges never form cycles.
/// Every in-flight run assignment to the dying region is rewritten.
fn merge_regions(
    table: &mut RegionTable,
    a: RegionId,
    b: RegionId,
    last_regions: &mut [Option<RegionId>],
    this_regions: &mut [Option<RegionId>],
) -> RegionResult<RegionId> {
    if a == b {
        return Ok(a);
    }
    let (dying, surviving) = if a > b { (a, b) } else { (b, a) };
    table.subsume(dying, surviving)?;
    for slot in last_regions.iter_mut().chain(this_regions.iter_mut()) {
        if *slot == Some(dying) {
            *slot = Some(surviving);
        }
    }
    Ok(surviving)
}

/// Reconcile one row against the row above it.
///
/// # Arguments
///
/// * `table` - Region table, updated in place
/// * `last` - Transitions of the previous row
/// * `last_regions` - Region of each previous-row run; rewritten on merges
/// * `this` - Transitions of the current row
/// * `y` - Image row of the current row (the bottom frame row is `height`)
///
/// # Returns
///
/// The region of each current-row run.
///
/// # Errors
///
/// [`crate::RegionError::InternalConsistency`] if a previous-row run has no
/// region or the cursors do not reach the end of both rows together, and
/// [`crate::RegionError::CapacityExceeded`] if the table is full.
pub(crate) fn reconcile_row(
    table: &mut RegionTable,
    last: &TransitionRow,
    last_regions: &mut [Option<RegionId>],
    this: &TransitionRow,
    y: i64,
) -> RegionResult<RowRegions> {
    if last_regions.len() != last.len() {
        return Err(table.consistency(format!(
            "{} region slots for {} previous-row runs",
            last_regions.len(),
            last.len()
        )));
    }

    let mut this_regions: RowRegions = vec![None; this.len()];
    let (mut li, mut ti) = (0usize, 0usize);

    while li < last.len() && ti < this.len() {
        let l = last.run(li);
        let t = this.run(ti);
        let case = AdjacencyCase::classify(&l, &t);
        let matched = l.color == t.color;

        match case {
            AdjacencyCase::PreviousBefore | AdjacencyCase::CurrentBefore => {}
            AdjacencyCase::OverlapRight => {
                if matched {
                    let id = run_region(table, last_regions, li, case)?;
                    table.extend(id, &t, y, l.end - t.start + 1)?;
                    this_regions[ti] = Some(id);
                }
            }
            AdjacencyCase::Contained | AdjacencyCase::ContainedEndAligned => {
                let above = run_region(table, last_regions, li, case)?;
                let id = if matched {
                    table.extend(above, &t, y, t.len())?;
                    above
                } else {
                    table.allocate(&t, y, above)?
                };
                this_regions[ti] = Some(id);
            }
            AdjacencyCase::EndAligned | AdjacencyCase::Covering | AdjacencyCase::OverlapLeft => {
                let above = run_region(table, last_regions, li, case)?;
                let overlap = if case == AdjacencyCase::OverlapLeft {
                    t.end - l.start + 1
                } else {
                    l.end - l.start + 1
                };
                match (matched, this_regions[ti]) {
                    (false, None) if case != AdjacencyCase::Covering => {
                        this_regions[ti] = Some(table.allocate(&t, y, above)?);
                    }
                    (true, None) => {
                        table.extend(above, &t, y, overlap)?;
                        this_regions[ti] = Some(above);
                    }
                    (true, Some(known)) => {
                        // The current run bridges two previous-row runs
                        let survivor =
                            merge_regions(table, known, above, last_regions, &mut this_regions)?;
                        table.get_mut(survivor)?.perimeter -= overlap;
                    }
                    _ => {}
                }
            }
        }

        if case.advances_last() {
            li += 1;
        }
        if case.advances_this() {
            ti += 1;
        }
    }

    if li != last.len() || ti != this.len() {
        return Err(table.consistency(format!(
            "row walk stopped at previous run {}/{} and current run {}/{}",
            li,
            last.len(),
            ti,
            this.len()
        )));
    }
    if let Some(i) = this_regions.iter().position(Option::is_none) {
        return Err(table.consistency(format!("current-row run {} left unassigned", i)));
    }

    Ok(this_regions)
}

fn run_region(
    table: &RegionTable,
    last_regions: &[Option<RegionId>],
    li: usize,
    case: AdjacencyCase,
) -> RegionResult<RegionId> {
    last_regions[li].ok_or_else(|| {
        table.consistency(format!(
            "case {} reached previous-row run {} without a region",
            case.number(),
            li
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionColor;

    fn run(start: i64, end: i64) -> Run {
        Run {
            start,
            end,
            color: RegionColor::Foreground,
        }
    }

    #[test]
    fn test_classify_all_cases() {
        use AdjacencyCase::*;
        // (last, this, expected)
        let cases = [
            (run(1, 2), run(4, 6), PreviousBefore),
            (run(1, 3), run(2, 5), OverlapRight),
            (run(1, 6), run(2, 4), Contained),
            (run(1, 6), run(3, 6), ContainedEndAligned),
            (run(3, 6), run(1, 6), EndAligned),
            (run(3, 6), run(3, 6), EndAligned),
            (run(3, 4), run(2, 6), Covering),
            (run(3, 6), run(1, 4), OverlapLeft),
            (run(5, 6), run(1, 4), CurrentBefore),
        ];
        for (l, t, expected) in cases {
            assert_eq!(AdjacencyCase::classify(&l, &t), expected, "{:?} {:?}", l, t);
        }
    }

    #[test]
    fn test_diagonal_runs_do_not_touch() {
        // previous run ends one column before the current run starts
        assert_eq!(
            AdjacencyCase::classify(&run(1, 2), &run(3, 5)),
            AdjacencyCase::OverlapRight
        );
        assert_eq!(
            AdjacencyCase::classify(&run(1, 2), &run(4, 5)),
            AdjacencyCase::PreviousBefore
        );
    }

    #[test]
    fn test_every_case_advances() {
        use AdjacencyCase::*;
        for case in [
            PreviousBefore,
            OverlapRight,
            Contained,
            ContainedEndAligned,
            EndAligned,
            Covering,
            OverlapLeft,
            CurrentBefore,
        ] {
            assert!(case.advances_last() || case.advances_this(), "{:?}", case);
        }
    }

    #[test]
    fn test_reconcile_first_row() {
        // 4-column image row: . # # .
        let mut table = RegionTable::new(4, 16);
        let top = TransitionRow::border(4);
        let mut top_regions = vec![Some(RegionId::BACKGROUND)];
        let row = TransitionRow::from_pixels(&[0, 255, 255, 0], 255);

        let regions = reconcile_row(&mut table, &top, &mut top_regions, &row, 0).unwrap();
        assert_eq!(
            regions,
            vec![
                Some(RegionId::BACKGROUND),
                Some(RegionId::new(1)),
                Some(RegionId::BACKGROUND),
            ]
        );
        let blob = table.get(RegionId::new(1)).unwrap();
        assert_eq!(blob.area, 2);
        assert_eq!(blob.parent, Some(RegionId::BACKGROUND));
        assert_eq!(blob.color, RegionColor::Foreground);
    }

    #[test]
    fn test_reconcile_merges_bridged_runs() {
        // # . #
        // # # #
        let mut table = RegionTable::new(3, 16);
        let top = TransitionRow::border(3);
        let mut top_regions = vec![Some(RegionId::BACKGROUND)];
        let row0 = TransitionRow::from_pixels(&[255, 0, 255], 255);
        let mut r0 = reconcile_row(&mut table, &top, &mut top_regions, &row0, 0).unwrap();
        assert_eq!(table.len(), 3); // background and two arms

        let row1 = TransitionRow::from_pixels(&[255, 255, 255], 255);
        let r1 = reconcile_row(&mut table, &row0, &mut r0, &row1, 1).unwrap();
        assert_eq!(r1[1], Some(RegionId::new(1)));
        assert!(table.regions()[2].subsumed);
        assert_eq!(table.regions()[1].area, 5);
    }

    #[test]
    fn test_reconcile_rejects_missing_region() {
        let mut table = RegionTable::new(2, 16);
        let top = TransitionRow::border(2);
        let mut top_regions = vec![None];
        let row = TransitionRow::from_pixels(&[0, 0], 255);
        assert!(reconcile_row(&mut table, &top, &mut top_regions, &row, 0).is_err());
    }
}
