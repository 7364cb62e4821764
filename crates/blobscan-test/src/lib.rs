//! blobscan-test - shared harness for the `*_reg.rs` regression tests
//!
//! `REGTEST_MODE=generate` rewrites the golden files under `tests/golden`,
//! `display` only writes output to `tests/regout`, and anything else
//! compares against the goldens.
//!
//! ```ignore
//! use blobscan_test::{Canvas, RegParams};
//!
//! let raster = Canvas::new(10, 8).fill(2, 3, 4, 3).build().unwrap();
//! let mut rp = RegParams::new("blobsingle");
//! rp.compare_values(12.0, raster.count_value(255) as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod canvas;
mod error;
mod params;

pub use canvas::Canvas;
pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Read `tests/data/images/{name}`.
pub fn load_test_image(name: &str) -> TestResult<blobscan_core::Raster> {
    let path = test_data_path(name);
    blobscan_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

fn workspace_root() -> String {
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Path of a file in the test image directory
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Directory of golden files
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Directory that receives regression output
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
