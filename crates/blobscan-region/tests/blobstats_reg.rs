//! Region statistics regression test
//!
//! Analyzes small synthetic canvases with known geometry and checks the
//! area, perimeter, moments and bounding box of every region.
//!
//! Run with:
//! ```
//! cargo test -p blobscan-region --test blobstats_reg
//! ```

use blobscan_region::{BlobAnalysis, BlobOptions, Region, RegionColor, RegionId, analyze};
use blobscan_test::{Canvas, RegParams};

/// Analyze a synthetic canvas and check that no perimeter is negative.
///
/// Holds for solid blobs with simple holes; dense noise can drive
/// background perimeters below zero.
fn analyze_canvas(canvas: Canvas, min_area: u64) -> BlobAnalysis {
    let raster = canvas.build().expect("canvas");
    let analysis =
        analyze(&raster, &BlobOptions::default().with_min_area(min_area)).expect("analyze");
    for (id, region) in analysis.iter() {
        assert!(
            region.perimeter >= 0,
            "region {} has perimeter {}",
            id,
            region.perimeter
        );
    }
    analysis
}

fn check_extent(rp: &mut RegParams, region: &Region, min_x: i64, max_x: i64, min_y: i64, max_y: i64) {
    rp.compare_values(min_x as f64, region.extent.min_x as f64, 0.0);
    rp.compare_values(max_x as f64, region.extent.max_x as f64, 0.0);
    rp.compare_values(min_y as f64, region.extent.min_y as f64, 0.0);
    rp.compare_values(max_y as f64, region.extent.max_y as f64, 0.0);
}

#[test]
fn blobstats_reg() {
    let mut rp = RegParams::new("blobstats");

    // --- Single filled rectangle ---
    let analysis = analyze_canvas(Canvas::new(10, 8).fill(2, 3, 4, 3), 0);
    eprintln!("rectangle: {} regions", analysis.region_count());
    rp.compare_values(1.0, analysis.region_count() as f64, 0.0);

    let bg = &analysis.regions()[0];
    rp.compare_values(108.0, bg.area as f64, 0.0);
    rp.compare_values(49.0, bg.perimeter as f64, 0.0);
    check_extent(&mut rp, bg, 0, 10, 0, 8);

    let rect = &analysis.regions()[1];
    assert_eq!(rect.parent, Some(RegionId::BACKGROUND));
    assert_eq!(rect.color, RegionColor::Foreground);
    rp.compare_values(12.0, rect.area as f64, 0.0);
    rp.compare_values(14.0, rect.perimeter as f64, 0.0);
    rp.compare_values(3.5, rect.moments.mean_x(), 1e-9);
    rp.compare_values(4.0, rect.moments.mean_y(), 1e-9);
    rp.compare_values(1.25, rect.moments.var_xx(), 1e-9);
    rp.compare_values(2.0 / 3.0, rect.moments.var_yy(), 1e-9);
    rp.compare_values(0.0, rect.moments.cov_xy(), 0.0);
    check_extent(&mut rp, rect, 2, 5, 3, 5);

    // Framed canvas area is conserved
    let total: u64 = analysis.regions().iter().map(|r| r.area).sum();
    rp.compare_values((12 * 10) as f64, total as f64, 0.0);

    // --- All-background canvas, regardless of min_area ---
    for min_area in [0, 100] {
        let analysis = analyze_canvas(Canvas::new(5, 4), min_area);
        rp.compare_values(0.0, analysis.region_count() as f64, 0.0);
        rp.compare_values(42.0, analysis.regions()[0].area as f64, 0.0);
        rp.compare_values(26.0, analysis.regions()[0].perimeter as f64, 0.0);
    }

    // --- Hourglass: two blocks joined by a one-pixel bridge ---
    let analysis = analyze_canvas(
        Canvas::new(12, 11)
            .fill(1, 1, 6, 4)
            .fill(3, 5, 1, 1)
            .fill(1, 6, 6, 4),
        0,
    );
    eprintln!("hourglass: {} regions", analysis.region_count());
    rp.compare_values(1.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(133.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(60.0, analysis.regions()[0].perimeter as f64, 0.0);
    let glass = &analysis.regions()[1];
    rp.compare_values(49.0, glass.area as f64, 0.0);
    rp.compare_values(40.0, glass.perimeter as f64, 0.0);
    rp.compare_values(3.489796, glass.moments.mean_x(), 1e-6);
    rp.compare_values(5.0, glass.moments.mean_y(), 1e-9);
    rp.compare_values(0.0, glass.moments.cov_xy(), 0.0);
    check_extent(&mut rp, glass, 1, 6, 1, 9);

    // --- U shape: arms merge at the bottom ---
    let analysis = analyze_canvas(
        Canvas::new(7, 6)
            .fill(1, 1, 1, 3)
            .fill(5, 1, 1, 3)
            .fill(1, 4, 5, 1),
        0,
    );
    rp.compare_values(1.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(61.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(35.0, analysis.regions()[0].perimeter as f64, 0.0);
    let u = &analysis.regions()[1];
    rp.compare_values(11.0, u.area as f64, 0.0);
    rp.compare_values(25.0, u.perimeter as f64, 0.0);
    check_extent(&mut rp, u, 1, 5, 1, 4);

    // --- Ring with a one-pixel hole ---
    let ring = || Canvas::new(9, 9).fill(2, 2, 5, 5).pixel(4, 4, 0);
    let analysis = analyze_canvas(ring(), 0);
    eprintln!("ring: {} regions", analysis.region_count());
    rp.compare_values(2.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(96.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(45.0, analysis.regions()[0].perimeter as f64, 0.0);
    let body = &analysis.regions()[1];
    rp.compare_values(24.0, body.area as f64, 0.0);
    rp.compare_values(22.0, body.perimeter as f64, 0.0);
    rp.compare_values(4.0, body.moments.mean_x(), 1e-9);
    rp.compare_values(4.0, body.moments.mean_y(), 1e-9);
    rp.compare_values(2.083333, body.moments.var_xx(), 1e-6);
    rp.compare_values(2.083333, body.moments.var_yy(), 1e-6);
    let hole = &analysis.regions()[2];
    assert_eq!(hole.color, RegionColor::Background);
    assert_eq!(hole.parent, Some(RegionId::new(1)));
    rp.compare_values(1.0, hole.area as f64, 0.0);
    rp.compare_values(4.0, hole.perimeter as f64, 0.0);

    // The hole is merged back into the ring
    let analysis = analyze_canvas(ring(), 2);
    rp.compare_values(1.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(96.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(37.0, analysis.regions()[0].perimeter as f64, 0.0);
    let body = &analysis.regions()[1];
    rp.compare_values(25.0, body.area as f64, 0.0);
    rp.compare_values(30.0, body.perimeter as f64, 0.0);
    rp.compare_values(2.0, body.moments.var_xx(), 1e-9);
    rp.compare_values(2.0, body.moments.var_yy(), 1e-9);

    // --- Diagonal neighbours are separate regions ---
    for (pixels, bg_perimeter) in [([(1, 1), (2, 2)], 26.0), ([(2, 1), (1, 2)], 27.0)] {
        let canvas = pixels
            .iter()
            .fold(Canvas::new(4, 4), |c, &(x, y)| c.pixel(x, y, 255));
        let analysis = analyze_canvas(canvas, 0);
        rp.compare_values(2.0, analysis.region_count() as f64, 0.0);
        rp.compare_values(34.0, analysis.regions()[0].area as f64, 0.0);
        rp.compare_values(bg_perimeter, analysis.regions()[0].perimeter as f64, 0.0);
        for dot in analysis.blobs() {
            rp.compare_values(1.0, dot.area as f64, 0.0);
            rp.compare_values(4.0, dot.perimeter as f64, 0.0);
        }
    }

    assert!(rp.cleanup(), "blobstats regression test failed");
}

#[test]
fn blobstats_small_region_elimination() {
    let mut rp = RegParams::new("blobstats_elim");
    let canvas = || Canvas::new(20, 12).fill(1, 1, 3, 1).fill(8, 2, 10, 5);

    // The 3-pixel bar falls below min_area and joins the background
    let analysis = analyze_canvas(canvas(), 10);
    rp.compare_values(1.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(258.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(95.0, analysis.regions()[0].perimeter as f64, 0.0);
    let block = &analysis.regions()[1];
    rp.compare_values(50.0, block.area as f64, 0.0);
    rp.compare_values(30.0, block.perimeter as f64, 0.0);
    rp.compare_values(12.5, block.moments.mean_x(), 1e-9);
    rp.compare_values(4.0, block.moments.mean_y(), 1e-9);
    rp.compare_values(8.25, block.moments.var_xx(), 1e-9);
    rp.compare_values(2.0, block.moments.var_yy(), 1e-9);
    check_extent(&mut rp, block, 8, 17, 2, 6);

    // Without a minimum both blobs are kept
    let analysis = analyze_canvas(canvas(), 0);
    rp.compare_values(2.0, analysis.region_count() as f64, 0.0);
    rp.compare_values(255.0, analysis.regions()[0].area as f64, 0.0);
    rp.compare_values(79.0, analysis.regions()[0].perimeter as f64, 0.0);
    let bar = &analysis.regions()[1];
    rp.compare_values(3.0, bar.area as f64, 0.0);
    rp.compare_values(8.0, bar.perimeter as f64, 0.0);
    check_extent(&mut rp, bar, 1, 3, 1, 1);
    rp.compare_values(50.0, analysis.regions()[2].area as f64, 0.0);
    rp.compare_values(30.0, analysis.regions()[2].perimeter as f64, 0.0);

    assert!(rp.cleanup(), "blobstats_elim regression test failed");
}

#[test]
fn blobstats_renormalize_is_fixed_point() {
    let analysis = analyze_canvas(Canvas::new(12, 11).fill(1, 1, 6, 4).fill(2, 5, 2, 3), 0);
    for region in analysis.regions() {
        let mut moments = region.moments;
        assert!(moments.is_centered());
        moments.normalize(region.area);
        assert_eq!(moments, region.moments);
    }
}
