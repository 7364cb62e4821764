//! PGM (Portable Graymap) format support
//!
//! Reads ASCII (P2) and binary (P5) graymaps and writes binary P5.
//! Samples with a maxval other than 255 are rescaled to 0..=255;
//! 16-bit samples (maxval > 255) are not supported.

use crate::{IoError, IoResult};
use blobscan_core::Raster;
use std::io::{BufRead, Read, Write};

/// Header fields shared by P2 and P5
struct PnmHeader {
    binary: bool,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Pull whitespace-separated header tokens, skipping `#` comments.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_space_and_comments(&mut self) {
        while self.pos < self.data.len() {
            let c = self.data[self.pos];
            if c == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_space_and_comments();
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let tok = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("PNM: missing {}", what)))?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM: bad {}", what)))
    }
}

fn read_header(tokens: &mut Tokens<'_>) -> IoResult<PnmHeader> {
    let binary = match tokens.next_token() {
        Some(b"P5") => true,
        Some(b"P2") => false,
        Some(other) => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {}",
                String::from_utf8_lossy(other)
            )));
        }
        None => return Err(IoError::InvalidData("PNM: empty input".to_string())),
    };
    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} (only 1..=255 supported)",
            maxval
        )));
    }
    Ok(PnmHeader {
        binary,
        width,
        height,
        maxval,
    })
}

#[inline]
fn rescale(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        v.min(255) as u8
    } else {
        ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PGM image (P2 or P5) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P2`/`P5` magic
///
/// # Returns
/// An 8-bit [`Raster`].
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(IoError::Io)?;

    let mut tokens = Tokens::new(&bytes);
    let header = read_header(&mut tokens)?;
    let npix = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PNM: {}x{} raster is too large",
                header.width, header.height
            ))
        })?;

    let data = if header.binary {
        // Exactly one whitespace byte separates maxval from the raster
        let start = tokens.pos + 1;
        let end = start.checked_add(npix);
        if end.is_none_or(|end| end > bytes.len()) {
            return Err(IoError::InvalidData(format!(
                "PNM: truncated raster, need {} bytes, have {}",
                npix,
                bytes.len().saturating_sub(start)
            )));
        }
        bytes[start..start + npix]
            .iter()
            .map(|&v| rescale(v as u32, header.maxval))
            .collect()
    } else {
        // the remaining input cannot hold more samples than bytes
        let mut data = Vec::with_capacity(npix.min(bytes.len() - tokens.pos));
        for _ in 0..npix {
            let v = tokens.next_u32("sample")?;
            data.push(rescale(v, header.maxval));
        }
        data
    };

    Ok(Raster::from_data(header.width, header.height, data)?)
}

/// Write a raster as a binary PGM (P5) to a writer.
///
/// # Arguments
/// * `raster` - The image to encode
/// * `writer` - Destination writer
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", raster.width(), raster.height()).map_err(IoError::Io)?;
    writer.write_all(raster.data()).map_err(IoError::Io)?;
    writer.flush().map_err(IoError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_ascii_with_comment() {
        let text = b"P2\n# a comment\n3 2\n255\n0 10 20\n30 40 255\n";
        let raster = read_pnm(Cursor::new(&text[..])).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.data(), &[0, 10, 20, 30, 40, 255]);
    }

    #[test]
    fn test_read_oversized_header() {
        let text = b"P2\n4294967295 4294967295\n255\n0 0 0\n";
        assert!(matches!(
            read_pnm(Cursor::new(&text[..])),
            Err(IoError::InvalidData(_))
        ));

        let text = b"P5\n4294967295 4294967295\n255\n\x00\x00";
        assert!(matches!(
            read_pnm(Cursor::new(&text[..])),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_rescales_maxval() {
        let text = b"P2 2 1 15 0 15";
        let raster = read_pnm(Cursor::new(&text[..])).unwrap();
        assert_eq!(raster.data(), &[0, 255]);
    }

    #[test]
    fn test_binary_roundtrip() {
        let raster = Raster::from_data(4, 2, vec![0, 1, 2, 3, 252, 253, 254, 255]).unwrap();
        let mut buf = Vec::new();
        write_pnm(&raster, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5\n4 2\n255\n"));

        let raster2 = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(raster2, raster);
    }

    #[test]
    fn test_truncated_binary() {
        let bytes = b"P5\n4 4\n255\n\x00\x01";
        assert!(matches!(
            read_pnm(Cursor::new(&bytes[..])),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_rejects_16bit() {
        let bytes = b"P5\n1 1\n65535\n\x00\x00";
        assert!(matches!(
            read_pnm(Cursor::new(&bytes[..])),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
