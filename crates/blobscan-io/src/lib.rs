//! blobscan-io - Raster I/O
//!
//! Decodes images into the single-channel 8-bit [`Raster`] consumed by the
//! region analysis, and encodes rasters back to disk.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |---|---|---|---|
//! | PNG | gray 1-16 bit, gray+alpha, RGB, RGBA, indexed | 8-bit gray | `png-format` |
//! | PGM | P2, P5 | P5 | `pnm` |
//!
//! Colour input is converted to luminance with integer weights
//! 0.299 / 0.587 / 0.114.

pub mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use blobscan_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Convert an RGB triple to 8-bit luminance.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Read an image from a file path.
///
/// The format is detected from the file contents, not the extension.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened and
/// [`IoError::UnsupportedFormat`] if the format is unknown or disabled.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path).map_err(IoError::Io)?;
    let raster = read_image_format(BufReader::new(file), format)?;
    log::debug!(
        "read {} ({:?}, {}x{})",
        path.display(),
        format,
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Raster> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write a raster to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref()).map_err(IoError::Io)?;
    write_image_format(raster, BufWriter::new(file), format)?;
    log::debug!("wrote {} ({:?})", path.as_ref().display(), format);
    Ok(())
}

/// Encode a raster into an in-memory buffer.
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(raster, &mut buf, format)?;
    Ok(buf)
}

fn write_image_format<W: std::io::Write>(
    raster: &Raster,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
