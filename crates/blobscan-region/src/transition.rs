//! Row transition extraction
//!
//! A row is encoded as the bordered column positions at which the colour
//! changes. Bordered column 0 and column `cols + 1` are a virtual
//! background frame, so every row starts with a background run and ends
//! with one. Runs alternate in colour: even runs are background, odd runs
//! foreground.

use crate::region::RegionColor;

/// A maximal horizontal run of one colour, in bordered columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First bordered column
    pub start: i64,
    /// Last bordered column (inclusive)
    pub end: i64,
    /// Colour of the run
    pub color: RegionColor,
}

impl Run {
    /// Number of pixels in the run
    #[inline]
    pub fn len(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Always false; a run holds at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The run in image columns; the left frame column maps to -1.
    #[inline]
    pub fn image_span(&self) -> (i64, i64) {
        (self.start - 1, self.end - 1)
    }
}

/// Transition list of one bordered row
///
/// Entry `i` is the exclusive end of run `i`; the final entry is always
/// `cols + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRow {
    ends: Vec<u32>,
}

impl TransitionRow {
    /// The synthetic all-background row above and below the image.
    pub fn border(cols: u32) -> Self {
        Self {
            ends: vec![cols + 2],
        }
    }

    /// Extract the transitions of one image row.
    ///
    /// A pixel is foreground when it equals `foreground`.
    pub fn from_pixels(row: &[u8], foreground: u8) -> Self {
        let cols = row.len() as u32;
        let mut ends = Vec::new();
        let mut last = false;
        for (c, &p) in row.iter().enumerate() {
            let cell = p == foreground;
            if cell != last {
                // image column c is bordered column c + 1
                ends.push(c as u32 + 1);
                last = cell;
            }
        }
        if last {
            ends.push(cols + 1);
        }
        ends.push(cols + 2);
        Self { ends }
    }

    /// Raw transition positions
    pub fn ends(&self) -> &[u32] {
        &self.ends
    }

    /// Number of runs in the row
    #[inline]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Always false; every row has at least the frame run.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Run `i` of the row.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn run(&self, i: usize) -> Run {
        let start = if i == 0 { 0 } else { self.ends[i - 1] as i64 };
        Run {
            start,
            end: self.ends[i] as i64 - 1,
            color: if i % 2 == 0 {
                RegionColor::Background
            } else {
                RegionColor::Foreground
            },
        }
    }

    /// Iterate over the runs left to right.
    pub fn runs(&self) -> impl Iterator<Item = Run> + '_ {
        (0..self.len()).map(move |i| self.run(i))
    }
}
