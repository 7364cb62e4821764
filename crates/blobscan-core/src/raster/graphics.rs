//! Rendering of rectangle outlines and centre markers
//!
//! Used to annotate a raster with the bounding boxes and centres of
//! detected regions. All drawing is clipped to the raster.

use super::RasterMut;
use crate::rect::Rect;

impl RasterMut {
    /// Draw the one-pixel outline of `rect` with value `val`.
    ///
    /// The outline runs along the inclusive border pixels of the
    /// rectangle. Parts outside the raster are skipped.
    pub fn draw_rect(&mut self, rect: &Rect, val: u8) {
        if rect.is_empty() {
            return;
        }
        let x0 = rect.x as i64;
        let y0 = rect.y as i64;
        self.draw_outline(x0, y0, x0 + rect.w as i64 - 1, y0 + rect.h as i64 - 1, val);
    }

    /// Outline of the inclusive box `x0..=x1` by `y0..=y1`, clipped.
    fn draw_outline(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, val: u8) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        for x in x0.max(0)..=x1.min(w - 1) {
            self.set_pixel_clipped(x, y0, val);
            self.set_pixel_clipped(x, y1, val);
        }
        for y in y0.max(0)..=y1.min(h - 1) {
            self.set_pixel_clipped(x0, y, val);
            self.set_pixel_clipped(x1, y, val);
        }
    }

    /// Draw a centre marker at (`cx`, `cy`).
    ///
    /// The marker is two square outlines of half-size `half`, the second
    /// offset by one pixel down and to the right, which keeps it visible
    /// on both light and dark backgrounds after thresholding.
    pub fn draw_marker(&mut self, cx: i32, cy: i32, half: u32, val: u8) {
        let (cx, cy, half) = (cx as i64, cy as i64, half as i64);
        for d in [0, 1] {
            self.draw_outline(cx - half + d, cy - half + d, cx + half + d, cy + half + d, val);
        }
    }
}
