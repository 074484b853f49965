//! # booth-io
//!
//! File formats for booth.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG    | yes  | yes   | 8/16-bit, palette, alpha kept |
//! | JPEG   | yes  | yes   | RGB, gray, CMYK; written without alpha |
//! | YAML   | yes  | yes   | Session files |
//!
//! Every image decodes to an RGBA8 [`RasterImage`].
//!
//! # Example
//!
//! ```rust,ignore
//! use booth_io::{read_image, session};
//!
//! let photo = read_image("shots/0001.jpg")?;
//! let job = session::load("job.yaml")?;
//! ```
//!
//! # Dependencies
//!
//! - [`png`] - PNG codec
//! - [`jpeg-decoder`], [`jpeg-encoder`] - JPEG codec
//! - [`serde_yaml`] - Session files
//!
//! # Used By
//!
//! - `booth-cli` - Command line front end
//! - `booth-tests` - Integration tests

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod session;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use error::{IoError, IoResult};
pub use session::{load as load_session, load_cube, LoadedSession, SessionFile};

use booth_core::RasterImage;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats booth can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG
    Png,
    /// JPEG
    Jpeg,
    /// Anything else
    Unknown,
}

impl Format {
    /// Detects the format of a file, magic bytes first, then extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let mut header = [0u8; 8];
        let n = File::open(path)?.read(&mut header)?;
        match Self::from_bytes(&header[..n]) {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }

    /// Detects the format from the file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects the format from leading magic bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            Format::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }
}

/// Reads an image as RGBA8, detecting the format.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RasterImage> {
    let path = path.as_ref();
    match Format::detect(path)? {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

/// Writes an image, choosing the format from the extension.
///
/// JPEG output uses [`jpeg::DEFAULT_QUALITY`].
pub fn write_image<P: AsRef<Path>>(path: P, image: &RasterImage) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image, jpeg::DEFAULT_QUALITY),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_extension("a.PNG"), Format::Png);
        assert_eq!(Format::from_extension("a.jpeg"), Format::Jpeg);
        assert_eq!(Format::from_extension("a.exr"), Format::Unknown);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Format::Jpeg);
        assert_eq!(Format::from_bytes(b"\x89PNG\r\n\x1a\n"), Format::Png);
        assert_eq!(Format::from_bytes(b"GIF8"), Format::Unknown);
    }

    #[test]
    fn test_magic_wins_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.jpg");
        crate::png::write(&path, &RasterImage::filled(3, 3, [1, 2, 3, 4])).unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);
        assert_eq!(read_image(&path).unwrap().pixel(2, 2), [1, 2, 3, 4]);
    }

    #[test]
    fn test_write_image_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = RasterImage::filled(8, 8, [50, 60, 70, 255]);
        write_image(dir.path().join("out.png"), &img).unwrap();
        write_image(dir.path().join("out.jpg"), &img).unwrap();
        assert_eq!(Format::detect(dir.path().join("out.jpg")).unwrap(), Format::Jpeg);
        assert!(matches!(
            write_image(dir.path().join("out.tif"), &img),
            Err(IoError::UnsupportedFormat(ext)) if ext == "tif"
        ));
    }
}
