//! Error types for compositing operations.

use booth_lut::LutError;
use thiserror::Error;

/// Error type for fitting and layer building.
///
/// None of these end a composite: the pipeline records them per frame and
/// keeps going.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Image or frame has zero, negative or non-finite size.
    #[error("invalid dimensions: image {image_width}x{image_height}, frame {frame_width}x{frame_height}")]
    InvalidDimensions {
        /// Source image width in pixels
        image_width: u32,
        /// Source image height in pixels
        image_height: u32,
        /// Frame width in template units
        frame_width: f64,
        /// Frame height in template units
        frame_height: f64,
    },

    /// A frame references a photo the store cannot provide.
    #[error("photo {photo_id:?} for frame {frame_id:?} is not available")]
    MissingPhoto {
        /// Frame holding the reference
        frame_id: String,
        /// Photo that could not be resolved
        photo_id: String,
    },

    /// A filter could not be loaded or applied; output falls back to the
    /// unfiltered photo.
    #[error("filter {filter_id:?}: {source}")]
    Filter {
        /// Catalog id of the filter
        filter_id: String,
        /// Underlying LUT condition
        #[source]
        source: LutError,
    },
}

/// Result type for compositing operations.
pub type OpsResult<T> = Result<T, OpsError>;
