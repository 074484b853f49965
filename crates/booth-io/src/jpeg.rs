//! JPEG format support.
//!
//! Camera photos arrive as JPEG. Decoding handles RGB, 8 and 16-bit gray
//! and CMYK, always producing opaque RGBA8. Writing drops alpha.

use crate::{IoError, IoResult};
use booth_core::RasterImage;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default encoder quality for exported prints.
pub const DEFAULT_QUALITY: u8 = 92;

/// Reads a JPEG file as RGBA8.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RasterImage> {
    let file = File::open(path.as_ref())?;
    decode_from(file)
}

/// Decodes an in-memory JPEG as RGBA8.
pub fn decode(bytes: &[u8]) -> IoResult<RasterImage> {
    decode_from(bytes)
}

fn decode_from<R: Read>(reader: R) -> IoResult<RasterImage> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    trace!(width = info.width, height = info.height, format = ?info.pixel_format, "jpeg::decode");

    let rgba: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        // Big-endian samples, keep the high byte
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l| [l[0], l[0], l[0], 255])
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgba).collect(),
    };

    Ok(RasterImage::from_data(info.width as u32, info.height as u32, rgba)?)
}

/// Naive CMYK to RGB, no profile.
fn cmyk_to_rgba(cmyk: &[u8]) -> [u8; 4] {
    let k = 1.0 - cmyk[3] as f32 / 255.0;
    let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2]), 255]
}

/// Writes an RGBA8 raster as JPEG at `quality` (1-100). Alpha is dropped.
pub fn write<P: AsRef<Path>>(path: P, image: &RasterImage, quality: u8) -> IoResult<()> {
    let data = encode(image, quality)?;
    std::fs::write(path.as_ref(), data)?;
    debug!(path = %path.as_ref().display(), quality, "jpeg written");
    Ok(())
}

/// Encodes an RGBA8 raster as JPEG bytes.
pub fn encode(image: &RasterImage, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = image.dimensions();
    if image.is_empty() || width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!("cannot encode {}x{} as JPEG", width, height)));
    }
    let rgb: Vec<u8> = image
        .data()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&rgb, width as u16, height as u16, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
