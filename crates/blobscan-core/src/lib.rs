//! blobscan core - Basic data structures for binary region analysis
//!
//! This crate provides the fundamental data structures used throughout
//! the blobscan crates:
//!
//! - [`Raster`] / [`RasterMut`] - Single-channel 8-bit image (immutable / mutable)
//! - [`Rect`] - Axis-aligned rectangle with inclusive-extent helpers
//!
//! Drawing helpers (`draw_rect`, `draw_marker`, `fill_rect`) live on
//! [`RasterMut`].

pub mod error;
pub mod raster;
pub mod rect;

pub use error::{Error, Result};
pub use raster::{Raster, RasterMut};
pub use rect::Rect;

/// Conventional foreground value of a thresholded raster.
pub const FOREGROUND: u8 = 255;

/// Conventional background value of a thresholded raster.
pub const BACKGROUND: u8 = 0;
