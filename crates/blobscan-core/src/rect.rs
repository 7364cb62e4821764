//! Rect - Rectangle regions
//!
//! Bounding rectangles of analysed regions. Region extents are tracked as
//! inclusive corner coordinates; [`Rect::from_extent`] converts them to the
//! origin-plus-size form used for drawing and clipping.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A simple `Copy` type since it is small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle covering the inclusive extent
    /// `[min_x, max_x] x [min_y, max_y]`.
    ///
    /// Returns `None` if the extent is empty (`max < min`).
    pub fn from_extent(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Option<Self> {
        if max_x < min_x || max_y < min_y {
            return None;
        }
        Some(Self {
            x: min_x as i32,
            y: min_y as i32,
            w: (max_x - min_x + 1) as i32,
            h: (max_y - min_y + 1) as i32,
        })
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the rectangle is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a point is inside the rectangle
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Length of the diagonal between the inclusive corner pixels.
    pub fn corner_diagonal(&self) -> f64 {
        let dx = (self.w - 1).max(0) as f64;
        let dy = (self.h - 1).max(0) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clip to an image of the given size.
    ///
    /// Returns `None` when nothing of the rectangle remains.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let right = self.right().min(width as i32);
        let bottom = self.bottom().min(height as i32);
        if x < right && y < bottom {
            Some(Rect {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extent() {
        let r = Rect::from_extent(2, 3, 5, 5).unwrap();
        assert_eq!(r, Rect::new_unchecked(2, 3, 4, 3));
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 6);
        assert_eq!(r.area(), 12);
        assert!(Rect::from_extent(4, 0, 3, 0).is_none());
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(Rect::new(0, 0, -1, 3).is_err());
        assert!(Rect::new(0, 0, 0, 3).unwrap().is_empty());
    }

    #[test]
    fn test_clip_to() {
        let r = Rect::new_unchecked(-2, 1, 5, 10);
        assert_eq!(r.clip_to(8, 6), Some(Rect::new_unchecked(0, 1, 3, 5)));
        assert_eq!(Rect::new_unchecked(9, 0, 2, 2).clip_to(8, 6), None);
    }

    #[test]
    fn test_corner_diagonal() {
        let r = Rect::from_extent(0, 0, 3, 4).unwrap();
        assert!((r.corner_diagonal() - 5.0).abs() < 1e-12);
        assert_eq!(Rect::from_extent(1, 1, 1, 1).unwrap().corner_diagonal(), 0.0);
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new_unchecked(1, 1, 2, 2);
        assert!(r.contains_point(2, 2));
        assert!(!r.contains_point(3, 1));
    }
}
