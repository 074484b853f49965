//! Applying a [`ColorCube`] to RGBA8 rasters.
//!
//! Two contracts are exposed:
//!
//! - [`apply`] returns a new image and leaves the input alone (previews,
//!   filter thumbnails)
//! - [`apply_in_place`] overwrites the buffer (full-resolution batch work)
//!
//! Each pixel reads only the cube and its own input, so rows are split
//! across the rayon pool with `par_chunks_mut`; every worker owns a
//! disjoint row slice and the call returns once all rows are done.
//!
//! # Example
//!
//! ```rust
//! use booth_core::RasterImage;
//! use booth_lut::{apply, ColorCube};
//!
//! let img = RasterImage::filled(8, 8, [200, 100, 50, 128]);
//! let out = apply(&img, &ColorCube::identity(33)).unwrap();
//! assert_eq!(out.pixel(3, 3), [200, 100, 50, 128]);
//! ```

use crate::{ColorCube, LutResult};
use booth_core::{CHANNELS, RasterImage, Rgba8};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Returns a filtered copy of `image`.
///
/// # Errors
///
/// [`LutError::DegenerateCube`](crate::LutError::DegenerateCube) if the cube
/// cannot be sampled; no image is produced and the caller keeps the input.
pub fn apply(image: &RasterImage, cube: &ColorCube) -> LutResult<RasterImage> {
    cube.ensure_usable()?;
    let mut out = image.clone();
    apply_in_place(&mut out, cube)?;
    Ok(out)
}

/// Filters `image` in place.
///
/// On error the buffer is left untouched.
pub fn apply_in_place(image: &mut RasterImage, cube: &ColorCube) -> LutResult<()> {
    cube.ensure_usable()?;
    if image.is_empty() {
        return Ok(());
    }
    trace!(width = image.width(), height = image.height(), size = cube.size(), "lut::apply_in_place");

    let row_bytes = image.row_bytes();
    let data = image.data_mut();

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_bytes)
        .for_each(|row| map_row(row, cube));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(row_bytes)
        .for_each(|row| map_row(row, cube));

    Ok(())
}

/// Single-threaded [`apply_in_place`], for callers already running inside
/// their own worker.
pub fn apply_in_place_sequential(image: &mut RasterImage, cube: &ColorCube) -> LutResult<()> {
    cube.ensure_usable()?;
    if image.is_empty() {
        return Ok(());
    }
    let row_bytes = image.row_bytes();
    image
        .data_mut()
        .chunks_mut(row_bytes)
        .for_each(|row| map_row(row, cube));
    Ok(())
}

/// Maps one RGBA8 pixel through the cube. Alpha is passed through.
///
/// A cube with no entries leaves the pixel as it is.
#[inline]
pub fn apply_pixel(cube: &ColorCube, px: Rgba8) -> Rgba8 {
    let rgb = [
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    ];
    let out = cube.sample(rgb);
    [to_u8(out[0]), to_u8(out[1]), to_u8(out[2]), px[3]]
}

#[inline]
fn map_row(row: &mut [u8], cube: &ColorCube) {
    for chunk in row.chunks_exact_mut(CHANNELS) {
        let px = [chunk[0], chunk[1], chunk[2], chunk[3]];
        chunk.copy_from_slice(&apply_pixel(cube, px));
    }
}

/// Scales to 0..255, rounds half away from zero, clamps.
#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
