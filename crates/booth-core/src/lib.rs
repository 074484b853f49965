//! # booth-core
//!
//! Core types shared by every booth crate.
//!
//! - [`RasterImage`] - RGBA8 pixel buffer with copy-on-write storage
//! - [`Rect`] - Integer pixel rectangle used for clipping
//! - [`Frame`], [`Template`] - Template regions that hold customer photos
//! - [`Error`] - Raster construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! booth-core (this crate)
//!    ^
//!    |
//!    +-- booth-lut (color cube parsing and application)
//!    +-- booth-ops (cover fitting, layer building, flattening)
//!    +-- booth-io (codecs, session files)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`Frame`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod image;
pub mod rect;

pub use error::*;
pub use frame::*;
pub use image::*;
pub use rect::*;
