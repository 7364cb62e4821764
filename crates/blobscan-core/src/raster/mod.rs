//! Raster - The single-channel 8-bit image container
//!
//! `Raster` is the image type consumed by the region analysis. Each pixel
//! is one byte; rows are stored contiguously without padding.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;
pub mod graphics;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal raster data
#[derive(Debug, Clone, PartialEq, Eq)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major pixel bytes, `width * height` long
    data: Vec<u8>,
}

impl RasterData {
    fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Single-channel 8-bit image
///
/// # Examples
///
/// ```
/// use blobscan_core::Raster;
///
/// let raster = Raster::new(640, 480).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// assert_eq!(raster.get_pixel(3, 4), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with every pixel set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let data = vec![0u8; width as usize * height as usize];
        Self::from_data(width, height, data)
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::new(width, height, data)?),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of references sharing this pixel buffer.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two rasters have the same dimensions.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Count the pixels equal to `value`.
    pub fn count_value(&self, value: u8) -> usize {
        self.inner.data.iter().filter(|&&p| p == value).count()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the raw pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every pixel to `value`.
    pub fn set_all(&mut self, value: u8) {
        self.inner.data.fill(value);
    }

    /// Set every pixel to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
