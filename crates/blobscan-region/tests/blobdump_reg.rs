//! Region table dump regression test
//!
//! Writes the text dump of two small analyses and compares it with the
//! golden files.
//!
//! Run with:
//! ```
//! cargo test -p blobscan-region --test blobdump_reg
//! ```
//!
//! Generate golden files:
//! ```
//! REGTEST_MODE=generate cargo test -p blobscan-region --test blobdump_reg
//! ```

use blobscan_region::{BlobOptions, RegionTableDump, analyze, format_region_table};
use blobscan_test::{Canvas, RegParams};

#[test]
fn blobdump_reg() {
    let mut rp = RegParams::new("blobdump");

    // 1: single rectangle
    let raster = Canvas::new(10, 8).fill(2, 3, 4, 3).build().expect("canvas");
    let analysis = analyze(&raster, &BlobOptions::default()).expect("analyze");
    let text = format_region_table(&analysis);
    eprint!("{}", text);
    rp.write_data_and_check(text.as_bytes(), "txt")
        .expect("write rectangle dump");

    // 2: ring with a hole
    let raster = Canvas::new(9, 9)
        .fill(2, 2, 5, 5)
        .pixel(4, 4, 0)
        .build()
        .expect("canvas");
    let analysis = analyze(&raster, &BlobOptions::default()).expect("analyze");
    let text = RegionTableDump(&analysis).to_string();
    rp.write_data_and_check(text.as_bytes(), "txt")
        .expect("write ring dump");

    // 3: the hole line as printed
    let hole = text.lines().nth(3).unwrap_or_default();
    rp.compare_strings(
        b"Region=2: 1 0 1 4 4.000000 4.000000 0.000000 0.000000 0.000000 4 4 4 4",
        hole.as_bytes(),
    );

    assert!(rp.cleanup(), "blobdump regression test failed");
}
