//! PNG format support.
//!
//! Decodes 8 and 16-bit gray, gray+alpha, RGB, RGBA and palette images to
//! RGBA8, and writes RGBA8 with an sRGB chunk. Template artwork is PNG so
//! its transparency reaches the compositor intact.
//!
//! # Example
//!
//! ```rust,ignore
//! use booth_io::png;
//!
//! let template = png::read("template.png")?;
//! png::write("print.png", &template)?;
//! ```

use crate::{IoError, IoResult};
use booth_core::RasterImage;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PNG file as RGBA8.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RasterImage> {
    let file = File::open(path.as_ref())?;
    decode_from(BufReader::new(file))
}

/// Decodes an in-memory PNG as RGBA8.
pub fn decode(bytes: &[u8]) -> IoResult<RasterImage> {
    decode_from(Cursor::new(bytes))
}

fn decode_from<R: BufRead + Seek>(reader: R) -> IoResult<RasterImage> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    trace!(width = info.width, height = info.height, color = ?info.color_type, depth = ?info.bit_depth, "png::decode");

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => bytes.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => bytes
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            bytes.iter().flat_map(|&g| [g, g, g, 255]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => bytes
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        // 16-bit: keep the high byte of each big-endian sample
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => bytes
            .chunks_exact(8)
            .flat_map(|p| [p[0], p[2], p[4], p[6]])
            .collect(),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => bytes
            .chunks_exact(6)
            .flat_map(|p| [p[0], p[2], p[4], 255])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => bytes
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], 255])
            .collect(),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => bytes
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[0], p[0], p[2]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!("{:?} {:?}", color_type, bit_depth)));
        }
    };

    Ok(RasterImage::from_data(info.width, info.height, rgba)?)
}

/// Writes an RGBA8 raster to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &RasterImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_to(BufWriter::new(file), image)?;
    debug!(path = %path.as_ref().display(), "png written");
    Ok(())
}

/// Encodes an RGBA8 raster as PNG bytes.
pub fn encode(image: &RasterImage) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_to(&mut buffer, image)?;
    Ok(buffer)
}

fn encode_to<W: Write>(writer: W, image: &RasterImage) -> IoResult<()> {
    if image.is_empty() {
        return Err(IoError::EncodeError("cannot encode an empty image".into()));
    }
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}
