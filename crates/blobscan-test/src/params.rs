//! Regression test state and checks
//!
//! Every check advances a running index. Files written by a check are
//! named `{regout}/{test}.{index:02}.{ext}` and compared with
//! `{golden}/{test}_golden.{index:02}.{ext}`, so a test must perform its
//! checks in a fixed order.

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use blobscan_core::Raster;
use blobscan_io::ImageFormat;
use std::fs;
use std::path::Path;

/// What file checks do with golden files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Copy every written file over its golden file
    Generate,
    /// Compare written files with the golden files
    #[default]
    Compare,
    /// Write output only; file checks always pass
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`; unset or unknown means compare.
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test
///
/// Failures are collected rather than raised, so a single run reports
/// every mismatching check; [`RegParams::cleanup`] gives the verdict.
pub struct RegParams {
    /// Test name, used in file names and messages
    pub test_name: String,
    /// Golden file handling
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test.
    ///
    /// Creates the golden and output directories if needed and prints a
    /// banner to stderr.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Index of the most recent check
    pub fn index(&self) -> usize {
        self.index
    }

    fn next_index(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    /// Record the outcome of check `index`; `detail` is only built on failure.
    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        if !ok {
            let msg = format!("{}_reg check {}: {}", self.test_name, self.index, detail());
            eprintln!("{}", msg);
            self.failures.push(msg);
        }
        ok
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next_index();
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!(
                "expected {}, got {} (difference {} > {})",
                expected, actual, diff, delta
            )
        })
    }

    /// Check that two rasters have the same size and pixels.
    pub fn compare_raster(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.next_index();
        if !expected.sizes_equal(actual) {
            return self.record(false, || {
                format!(
                    "raster size {}x{} differs from {}x{}",
                    actual.width(),
                    actual.height(),
                    expected.width(),
                    expected.height()
                )
            });
        }
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        let w = expected.width() as usize;
        self.record(mismatch.is_none(), || {
            let pos = mismatch.unwrap_or_default();
            format!("first pixel mismatch at ({}, {})", pos % w, pos / w)
        })
    }

    /// Check that two byte strings are identical.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.next_index();
        self.record(expected == actual, || {
            let at = expected
                .iter()
                .zip(actual)
                .position(|(a, b)| a != b)
                .unwrap_or(expected.len().min(actual.len()));
            format!(
                "strings differ at byte {} (lengths {} and {})",
                at,
                expected.len(),
                actual.len()
            )
        })
    }

    /// Write `raster` in `format` and check it against its golden file.
    ///
    /// # Errors
    ///
    /// Fails if the raster cannot be encoded or a file cannot be written.
    pub fn write_raster_and_check(&mut self, raster: &Raster, format: ImageFormat) -> TestResult<()> {
        self.next_index();
        let local = self.local_path(format.extension());
        blobscan_io::write_image(raster, &local, format).map_err(|e| TestError::ImageWrite {
            path: local.clone(),
            message: e.to_string(),
        })?;
        self.check_file(&local, format.extension())
    }

    /// Write raw `data` and check it against its golden file.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be written or read.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.next_index();
        let local = self.local_path(ext);
        fs::write(&local, data)?;
        self.check_file(&local, ext)
    }

    fn local_path(&self, ext: &str) -> String {
        format!("{}/{}.{:02}.{}", regout_dir(), self.test_name, self.index, ext)
    }

    fn golden_path(&self, ext: &str) -> String {
        format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        )
    }

    fn check_file(&mut self, local: &str, ext: &str) -> TestResult<()> {
        let golden = self.golden_path(ext);
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local, &golden)?;
                eprintln!("generated {}", golden);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden).exists() {
                    self.record(false, || format!("missing golden file {}", golden));
                    return Ok(());
                }
                let same = fs::read(local)? == fs::read(&golden)? || same_pixels(local, &golden);
                self.record(same, || format!("{} differs from {}", local, golden));
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Print the verdict and return whether every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("PASS: {}_reg ({} checks)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAIL: {}_reg ({} of {} checks)",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        self.failures.is_empty()
    }

    /// Whether every check so far passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Messages of the failed checks
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Image files can differ byte-wise across encoders and still decode to
/// the same pixels.
fn same_pixels(a: &str, b: &str) -> bool {
    matches!(
        (blobscan_io::read_image(a), blobscan_io::read_image(b)),
        (Ok(ra), Ok(rb)) if ra == rb
    )
}
