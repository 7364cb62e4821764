//! Raster I/O regression test
//!
//! Reads the grayscale test image and round-trips it through every
//! supported format, on disk and in memory.
//!
//! Run with:
//! ```
//! cargo test -p blobscan-io --test ioformats_reg
//! ```

use blobscan_io::{
    ImageFormat, detect_format, detect_format_from_bytes, read_image, read_image_mem, write_image,
    write_image_mem,
};
use blobscan_test::{RegParams, load_test_image, regout_dir};
use std::fs;

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");

    let pix1 = match load_test_image("dots.pgm") {
        Ok(raster) => raster,
        Err(e) => panic!("Failed to load test image: {}", e),
    };
    rp.compare_values(64.0, pix1.width() as f64, 0.0); // 1
    rp.compare_values(48.0, pix1.height() as f64, 0.0); // 2

    for format in [ImageFormat::Pnm, ImageFormat::Png] {
        eprintln!("=== {:?} roundtrip ===", format);

        // File roundtrip
        let path = format!("{}/ioformats_dots.{}", outdir, format.extension());
        write_image(&pix1, &path, format).expect("write image");
        assert_eq!(detect_format(&path).expect("detect"), format);
        let pix2 = read_image(&path).expect("read image");
        rp.compare_raster(&pix1, &pix2);

        // Memory roundtrip
        let data = write_image_mem(&pix1, format).expect("write mem");
        assert_eq!(detect_format_from_bytes(&data).expect("detect mem"), format);
        let pix3 = read_image_mem(&data).expect("read mem");
        rp.compare_raster(&pix1, &pix3);
    }

    // PNM output is byte-for-byte the same as the binary test image
    let data = write_image_mem(&pix1, ImageFormat::Pnm).expect("write pnm");
    let original = fs::read(blobscan_test::test_data_path("dots.pgm")).expect("read dots.pgm");
    rp.compare_strings(&original, &data);

    assert!(rp.cleanup(), "ioformats regression test failed");
}
