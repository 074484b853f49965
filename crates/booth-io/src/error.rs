//! Error types for file operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported image format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Pixel layout the decoder cannot turn into RGBA8.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Session file is not valid YAML for the expected schema.
    #[error("session {path}: {source}")]
    Session {
        /// Session file
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// Session file is well-formed but inconsistent.
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// Decoded pixels did not form a valid raster.
    #[error(transparent)]
    Raster(#[from] booth_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
