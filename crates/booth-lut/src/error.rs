//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors and warning-level conditions raised while parsing or applying a
/// color cube.
#[derive(Debug, Error)]
pub enum LutError {
    /// `LUT_3D_SIZE` or a domain line is missing, non-numeric or out of range.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A data line is not exactly three floating point values.
    #[error("invalid data line {line}: {content:?}")]
    InvalidDataLine {
        /// 1-based line number
        line: usize,
        /// Trimmed line text
        content: String,
    },

    /// Entry count differs from `size³`. Warning level: the cube stays usable.
    #[error("expected {expected} entries, found {found}")]
    SizeMismatch {
        /// `size³`
        expected: usize,
        /// Entries actually read
        found: usize,
    },

    /// Cube cannot be sampled (size below 2 or no entries).
    #[error("degenerate cube: size {size}, {entries} entries")]
    DegenerateCube {
        /// Declared edge length
        size: usize,
        /// Entries present
        entries: usize,
    },

    /// I/O error while reading or writing a cube file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Returns `true` for conditions that leave the cube usable.
    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }
}
