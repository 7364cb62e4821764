//! Format identification by header signature

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported raster file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Portable Graymap (P2/P5)
    Pnm,
}

impl ImageFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pnm => "pgm",
        }
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Detect the format of a file from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
    File::open(path)?
        .take(PNG_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format of an in-memory image.
///
/// Only binary and ASCII graymaps (`P5`, `P2`) are recognised among the
/// netpbm family.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    match data {
        [] | [_] => Err(IoError::InvalidData(format!(
            "{} byte header is too short to identify",
            data.len()
        ))),
        _ if data.starts_with(&PNG_SIGNATURE) => Ok(ImageFormat::Png),
        [b'P', b'2' | b'5', ..] => Ok(ImageFormat::Pnm),
        [a, b, ..] => Err(IoError::UnsupportedFormat(format!(
            "unrecognised header {:02x} {:02x}",
            a, b
        ))),
    }
}
