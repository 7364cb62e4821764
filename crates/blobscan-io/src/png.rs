//! PNG image format support
//!
//! Every decoded image is reduced to a single 8-bit luminance channel;
//! alpha is discarded. Output is always 8-bit grayscale.

use crate::{IoError, IoResult, luminance};
use blobscan_core::Raster;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    match (color_type, bit_depth) {
        (ColorType::Grayscale, _)
        | (ColorType::Indexed, _)
        | (ColorType::GrayscaleAlpha, BitDepth::Eight | BitDepth::Sixteen)
        | (ColorType::Rgb, BitDepth::Eight | BitDepth::Sixteen)
        | (ColorType::Rgba, BitDepth::Eight | BitDepth::Sixteen) => {}
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let wide = bit_depth == BitDepth::Sixteen;

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        for x in 0..width as usize {
            let val = match color_type {
                ColorType::Grayscale => gray_sample(row, x, bit_depth),
                ColorType::Indexed => {
                    let index = packed_sample(row, x, bit_depth) as usize;
                    let palette = palette.as_deref().ok_or_else(|| {
                        IoError::InvalidData("indexed PNG without palette".to_string())
                    })?;
                    match palette.get(index * 3..index * 3 + 3) {
                        Some(rgb) => luminance(rgb[0], rgb[1], rgb[2]),
                        None => {
                            return Err(IoError::InvalidData(format!(
                                "palette index {} out of range",
                                index
                            )));
                        }
                    }
                }
                ColorType::GrayscaleAlpha => {
                    let samples = if wide { 4 } else { 2 };
                    row[x * samples]
                }
                ColorType::Rgb | ColorType::Rgba => {
                    let channels = if color_type == ColorType::Rgb { 3 } else { 4 };
                    let step = if wide { 2 } else { 1 };
                    let idx = x * channels * step;
                    luminance(row[idx], row[idx + step], row[idx + 2 * step])
                }
            };
            out.push(val);
        }
    }

    Ok(Raster::from_data(width, height, out)?)
}

/// Extract a packed sample of 1, 2, 4 or 8 bits; 16-bit returns the high byte.
fn packed_sample(row: &[u8], x: usize, bit_depth: BitDepth) -> u8 {
    match bit_depth {
        BitDepth::One => (row[x / 8] >> (7 - (x % 8))) & 1,
        BitDepth::Two => (row[x / 4] >> (6 - (x % 4) * 2)) & 3,
        BitDepth::Four => {
            if x % 2 == 0 {
                (row[x / 2] >> 4) & 0xF
            } else {
                row[x / 2] & 0xF
            }
        }
        BitDepth::Eight => row[x],
        BitDepth::Sixteen => row[x * 2],
    }
}

/// Gray sample scaled to the full 8-bit range.
fn gray_sample(row: &[u8], x: usize, bit_depth: BitDepth) -> u8 {
    let v = packed_sample(row, x, bit_depth);
    match bit_depth {
        BitDepth::One => v * 255,
        BitDepth::Two => v * 85,
        BitDepth::Four => v * 17,
        BitDepth::Eight | BitDepth::Sixteen => v,
    }
}

/// Write a PNG image as 8-bit grayscale
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
