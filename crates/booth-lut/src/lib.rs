//! # booth-lut
//!
//! Color-grading cubes for booth.
//!
//! This crate parses the text `.cube` 3D lookup-table format into a
//! [`ColorCube`] and applies it to RGBA8 rasters with trilinear
//! interpolation.
//!
//! # Usage
//!
//! ```rust
//! use booth_core::RasterImage;
//! use booth_lut::{apply, cube};
//!
//! let text = "LUT_3D_SIZE 2\n\
//!             0 0 0\n0 0 1\n0 1 0\n0 1 1\n\
//!             1 0 0\n1 0 1\n1 1 0\n1 1 1\n";
//! let cube = cube::parse(text).unwrap();
//!
//! let photo = RasterImage::filled(4, 4, [255, 0, 0, 255]);
//! let graded = apply(&photo, &cube).unwrap();
//! assert_eq!(graded.pixel(0, 0), [255, 0, 0, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - split rows across the rayon thread pool
//!
//! # Dependencies
//!
//! - [`booth-core`] - Raster buffers
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Parse diagnostics
//!
//! # Used By
//!
//! - `booth-ops` - Composite pipeline
//! - `booth-io` - Filter catalog loading

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod apply;
mod color_cube;
mod error;
pub mod cube;

pub use apply::{apply, apply_in_place, apply_in_place_sequential, apply_pixel};
pub use color_cube::ColorCube;
pub use error::{LutError, LutResult};
pub use cube::{parse as parse_cube, read_3d as read_cube, write_3d as write_cube};
