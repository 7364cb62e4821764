//! Synthetic raster builder for tests

use crate::TestResult;
use blobscan_core::{BACKGROUND, FOREGROUND, Raster};

/// Builder for small synthetic rasters
///
/// Starts all-background; rectangles and pixels are painted in order, so
/// later calls overwrite earlier ones. Everything is clipped to the canvas.
///
/// ```ignore
/// // 4x3 foreground block with a one-pixel hole
/// let raster = Canvas::new(8, 8)
///     .fill(2, 2, 4, 3)
///     .pixel(3, 3, 0)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create an all-background canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    /// Paint a `w` x `h` rectangle at (`x`, `y`) with the foreground value.
    pub fn fill(self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.fill_value(x, y, w, h, FOREGROUND)
    }

    /// Paint a rectangle with an arbitrary value.
    pub fn fill_value(mut self, x: u32, y: u32, w: u32, h: u32, value: u8) -> Self {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                self.data[yy as usize * self.width as usize + xx as usize] = value;
            }
        }
        self
    }

    /// Set a single pixel.
    pub fn pixel(self, x: u32, y: u32, value: u8) -> Self {
        self.fill_value(x, y, 1, 1, value)
    }

    /// Build a canvas from text rows: `#` is foreground, anything else
    /// background. All rows must have the same length.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let data = rows
            .iter()
            .flat_map(|r| r.bytes())
            .map(|b| if b == b'#' { FOREGROUND } else { BACKGROUND })
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Finish the canvas.
    ///
    /// # Errors
    ///
    /// Fails for a zero-sized canvas or ragged ASCII rows.
    pub fn build(self) -> TestResult<Raster> {
        Ok(Raster::from_data(self.width, self.height, self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_pixel() {
        let raster = Canvas::new(6, 5)
            .fill(1, 1, 3, 2)
            .pixel(2, 1, 0)
            .build()
            .unwrap();
        assert_eq!(raster.count_value(FOREGROUND), 5);
        assert_eq!(raster.get_pixel(2, 1), Some(0));
        assert_eq!(raster.get_pixel(3, 2), Some(FOREGROUND));
    }

    #[test]
    fn test_fill_clipped() {
        let raster = Canvas::new(4, 4).fill(2, 2, 10, 10).build().unwrap();
        assert_eq!(raster.count_value(FOREGROUND), 4);
    }

    #[test]
    fn test_from_ascii() {
        let raster = Canvas::from_ascii(&["#..", ".#.", "..#"]).build().unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.count_value(FOREGROUND), 3);
        assert_eq!(raster.get_pixel(1, 1), Some(FOREGROUND));

        assert!(Canvas::from_ascii(&["##", "#"]).build().is_err());
        assert!(Canvas::new(0, 3).build().is_err());
    }
}
