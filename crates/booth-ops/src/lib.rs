//! # booth-ops
//!
//! Print composition for booth templates.
//!
//! Takes a template (frames plus artwork), the operator's photos and an
//! optional filter, and produces the ordered draw instructions for a print.
//!
//! # Modules
//!
//! - [`fit`] - Cover fitting of a photo into a frame
//! - [`composite`] - Layer building, display scale, cancellation
//! - [`filter`] - Filter catalog, resolution with fallback, previews
//! - [`flatten`] - CPU reference surface for exporting a composite
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use booth_core::{Frame, RasterImage, Template};
//! use booth_ops::{build_layers, flatten, Session};
//!
//! let template = Template::new(None, vec![
//!     Frame::new("only", 10.0, 10.0, 50.0, 50.0).with_photo("p"),
//! ]);
//! let mut photos = HashMap::new();
//! photos.insert("p".to_string(), RasterImage::filled(80, 40, [0, 128, 255, 255]));
//!
//! let session = Session { scale: 1.0, canvas: (100, 100) };
//! let composite = build_layers(&template, &photos, None, session);
//! let print = flatten(&composite.layers, 100, 100, [255, 255, 255, 255]);
//! assert_eq!(print.pixel(30, 30), [0, 128, 255, 255]);
//! assert_eq!(print.pixel(5, 5), [255, 255, 255, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - rayon row splitting in filtering and flattening
//!
//! # Dependencies
//!
//! - [`booth-core`] - Rasters, frames, templates
//! - [`booth-lut`] - Color cubes
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Conditions and diagnostics
//!
//! # Used By
//!
//! - `booth-cli` - Command line front end
//! - `booth-io` - Session loading

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod filter;
pub mod fit;
pub mod flatten;

pub use composite::{
    build_layers, build_layers_with_cancel, Composite, Condition, DrawLayer, LayerKind, PhotoStore, Session,
    PAPER_4R,
};
pub use error::{OpsError, OpsResult};
pub use filter::{previews, resolve_filter, FilterCatalog, FilterEntry, FilterPreview, ResolvedFilter, ORIGINAL_FILTER};
pub use fit::{cover_scale, fit, fit_frame, FitResult};
pub use flatten::{flatten, flatten_onto};
