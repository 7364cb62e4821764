//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels and rows.

use super::{Raster, RasterMut};
use crate::error::{Error, Result};
use crate::rect::Rect;

impl Raster {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[y as usize * self.width() as usize + x as usize]
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width() as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Iterate over the rows from top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.inner.data.chunks(self.width() as usize)
    }
}

impl RasterMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.inner.data[y as usize * self.width() as usize + x as usize])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = y as usize * self.width() as usize + x as usize;
        self.inner.data[idx] = val;
    }

    /// Set a pixel if it lies inside the raster; silently skip it otherwise.
    #[inline]
    pub fn set_pixel_clipped(&mut self, x: i64, y: i64, val: u8) {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            self.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }

    /// Get one row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width() as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get one row of pixels mutably.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.width() as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Fill a rectangle with `val`, clipped to the raster.
    pub fn fill_rect(&mut self, rect: &Rect, val: u8) {
        let Some(r) = rect.clip_to(self.width(), self.height()) else {
            return;
        };
        for y in r.y..r.bottom() {
            let row = self.row_mut(y as u32);
            row[r.x as usize..r.right() as usize].fill(val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let mut raster = Raster::new(5, 3).unwrap().try_into_mut().unwrap();
        raster.set_pixel(4, 2, 200).unwrap();
        assert_eq!(raster.get_pixel(4, 2), Some(200));
        assert!(raster.set_pixel(5, 0, 1).is_err());

        let raster: Raster = raster.into();
        assert_eq!(raster.get_pixel(4, 2), Some(200));
        assert_eq!(raster.get_pixel(0, 3), None);
        assert_eq!(raster.row(2), &[0, 0, 0, 0, 200]);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut raster = Raster::new(4, 4).unwrap().try_into_mut().unwrap();
        raster.fill_rect(&Rect::new_unchecked(2, 2, 5, 5), 1);
        let raster: Raster = raster.into();
        assert_eq!(raster.count_value(1), 4);
        assert_eq!(raster.get_pixel(3, 3), Some(1));
        assert_eq!(raster.get_pixel(1, 3), Some(0));
    }

    #[test]
    fn test_rows_iterator() {
        let raster = Raster::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rows: Vec<&[u8]> = raster.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3, 4][..], &[5, 6][..]]);
    }
}
