//! Text color-cube (`.cube`) format.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "Warm Print"
//! LUT_3D_SIZE 2
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Keyword lines may appear in any order, but data lines must come after
//! `LUT_3D_SIZE`. Data lines are stored in file order and addressed
//! red-major (see [`ColorCube`]).
//!
//! # Example
//!
//! ```rust
//! use booth_lut::cube;
//!
//! let text = "LUT_3D_SIZE 2\n0 0 0\n0 0 1\n0 1 0\n0 1 1\n1 0 0\n1 0 1\n1 1 0\n1 1 1\n";
//! let cube = cube::parse(text).unwrap();
//! assert_eq!(cube.size(), 2);
//! ```

use crate::{ColorCube, LutError, LutResult};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

/// Largest `LUT_3D_SIZE` accepted.
pub const MAX_SIZE: usize = 256;

/// Reads and parses a cube file.
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<ColorCube> {
    let path = path.as_ref();
    trace!(path = %path.display(), "cube::read_3d");
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parses cube text.
///
/// A short or long table is logged as a [`LutError::SizeMismatch`] warning
/// and still returned; call [`ColorCube::check`] to get the condition as a
/// value.
///
/// # Errors
///
/// - [`LutError::MalformedHeader`] if `LUT_3D_SIZE` is missing or invalid,
///   a domain line is invalid, or data appears before the size
/// - [`LutError::InvalidDataLine`] if a data line is not three floats
pub fn parse(text: &str) -> LutResult<ColorCube> {
    let mut size: Option<usize> = None;
    let mut title: Option<String> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut entries: Vec<[f32; 3]> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let keyword = line.split_whitespace().next().unwrap_or_default();
        match keyword {
            "TITLE" => {
                title = Some(parse_title(line));
            }
            "LUT_3D_SIZE" => {
                if size.is_some() {
                    return Err(LutError::MalformedHeader("duplicate LUT_3D_SIZE".into()));
                }
                let n = parse_size(line)?;
                entries.reserve(n.pow(3).min(1 << 16));
                size = Some(n);
            }
            "LUT_1D_SIZE" => {
                return Err(LutError::MalformedHeader(
                    "expected 3D LUT, found LUT_1D_SIZE".into(),
                ));
            }
            "DOMAIN_MIN" => domain_min = parse_domain(line)?,
            "DOMAIN_MAX" => domain_max = parse_domain(line)?,
            _ => {
                let rgb = parse_rgb(line).ok_or_else(|| LutError::InvalidDataLine {
                    line: idx + 1,
                    content: line.to_string(),
                })?;
                if size.is_none() {
                    return Err(LutError::MalformedHeader(format!(
                        "data on line {} before LUT_3D_SIZE",
                        idx + 1
                    )));
                }
                entries.push(rgb);
            }
        }
    }

    let size = size.ok_or_else(|| LutError::MalformedHeader("missing LUT_3D_SIZE".into()))?;

    let mut cube = ColorCube::new(size, entries).with_domain(domain_min, domain_max);
    if let Some(title) = title {
        cube = cube.with_title(title);
    }

    if let Err(mismatch) = cube.check() {
        warn!(size, %mismatch, "cube entry count does not match LUT_3D_SIZE");
    }
    debug!(size, entries = cube.entries().len(), title = ?cube.title(), "parsed color cube");

    Ok(cube)
}

/// Serializes a cube as cube text, entries in stored order.
///
/// # Example
///
/// ```rust
/// use booth_lut::{cube, ColorCube};
///
/// let text = cube::write(&ColorCube::identity(2));
/// assert!(text.contains("LUT_3D_SIZE 2"));
/// assert_eq!(cube::parse(&text).unwrap(), ColorCube::identity(2));
/// ```
pub fn write(cube: &ColorCube) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "# Generated by booth-lut");
    if let Some(title) = cube.title() {
        let _ = writeln!(out, "TITLE \"{}\"", title);
    }
    let _ = writeln!(out, "LUT_3D_SIZE {}", cube.size());

    let min = cube.domain_min();
    let max = cube.domain_max();
    if min != [0.0, 0.0, 0.0] || max != [1.0, 1.0, 1.0] {
        let _ = writeln!(out, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2]);
        let _ = writeln!(out, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2]);
    }
    out.push('\n');

    for rgb in cube.entries() {
        let _ = writeln!(out, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2]);
    }
    out
}

/// Writes a cube file.
pub fn write_3d<P: AsRef<Path>>(path: P, cube: &ColorCube) -> LutResult<()> {
    fs::write(path, write(cube))?;
    Ok(())
}

// Helper functions

fn parse_title(line: &str) -> String {
    line["TITLE".len()..].trim().trim_matches('"').to_string()
}

fn parse_size(line: &str) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(LutError::MalformedHeader(format!("invalid size line: {}", line)));
    }
    let size: i64 = parts[1]
        .parse()
        .map_err(|_| LutError::MalformedHeader(format!("invalid size value: {}", parts[1])))?;
    if size <= 0 {
        return Err(LutError::MalformedHeader(format!("size must be positive, got {}", size)));
    }
    if size as usize > MAX_SIZE {
        return Err(LutError::MalformedHeader(format!(
            "size {} exceeds maximum {}",
            size, MAX_SIZE
        )));
    }
    Ok(size as usize)
}

fn parse_domain(line: &str) -> LutResult<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let keyword = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();
    parse_triple(&rest)
        .ok_or_else(|| LutError::MalformedHeader(format!("invalid {} line: {}", keyword, line)))
}

fn parse_rgb(line: &str) -> Option<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parse_triple(&parts)
}

fn parse_triple(parts: &[&str]) -> Option<[f32; 3]> {
    if parts.len() != 3 {
        return None;
    }
    let mut rgb = [0.0f32; 3];
    for (slot, token) in rgb.iter_mut().zip(parts) {
        let value: f32 = token.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE2: &str = r#"
# Test LUT
TITLE "Test Grade"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 1.0 1.0 1.0

0.0 0.0 0.0
0.0 0.0 1.0
0.0 1.0 0.0
0.0 1.0 1.0
1.0 0.0 0.0
1.0 0.0 1.0
1.0 1.0 0.0
1.0 1.0 1.0
"#;

    #[test]
    fn parse_size_2() {
        let cube = parse(SIZE2).expect("parse failed");
        assert_eq!(cube.size(), 2);
        assert_eq!(cube.entries().len(), 8);
        assert_eq!(cube.title(), Some("Test Grade"));
        assert_eq!(cube.entries()[7], [1.0, 1.0, 1.0]);
        assert!(cube.check().is_ok());
    }

    #[test]
    fn parse_keywords_in_any_order() {
        let text = "DOMAIN_MAX 2 2 2\nLUT_3D_SIZE 2\nDOMAIN_MIN -1 -1 -1\n".to_string()
            + &"0.5 0.5 0.5\n".repeat(8);
        let cube = parse(&text).unwrap();
        assert_eq!(cube.domain_min(), [-1.0; 3]);
        assert_eq!(cube.domain_max(), [2.0; 3]);
    }

    #[test]
    fn missing_size_is_malformed() {
        let err = parse("0 0 0\n1 1 1\n").unwrap_err();
        assert!(matches!(err, LutError::MalformedHeader(_)));

        let err = parse("# only comments\n").unwrap_err();
        assert!(matches!(err, LutError::MalformedHeader(_)));
    }

    #[test]
    fn bad_size_values() {
        for text in ["LUT_3D_SIZE\n", "LUT_3D_SIZE abc\n", "LUT_3D_SIZE 0\n", "LUT_3D_SIZE -4\n", "LUT_3D_SIZE 1000\n"] {
            assert!(
                matches!(parse(text), Err(LutError::MalformedHeader(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn bad_data_line_reports_line_number() {
        let text = "LUT_3D_SIZE 2\n0 0 0\n0 0\n";
        match parse(text) {
            Err(LutError::InvalidDataLine { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "0 0");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            parse("LUT_3D_SIZE 2\n0 0 x\n"),
            Err(LutError::InvalidDataLine { .. })
        ));
        assert!(matches!(
            parse("LUT_3D_SIZE 2\n0 0 0 0\n"),
            Err(LutError::InvalidDataLine { .. })
        ));
    }

    #[test]
    fn size_mismatch_is_not_fatal() {
        let cube = parse("LUT_3D_SIZE 2\n0 0 0\n1 1 1\n").unwrap();
        assert!(matches!(
            cube.check(),
            Err(LutError::SizeMismatch { expected: 8, found: 2 })
        ));
    }

    #[test]
    fn one_d_lut_rejected() {
        assert!(matches!(
            parse("LUT_1D_SIZE 3\n0 0 0\n"),
            Err(LutError::MalformedHeader(_))
        ));
    }

    #[test]
    fn roundtrip_file() {
        let cube = ColorCube::identity(4).with_title("ident");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.cube");

        write_3d(&path, &cube).expect("write failed");
        let loaded = read_3d(&path).expect("read failed");

        assert_eq!(loaded.size(), 4);
        assert_eq!(loaded.title(), Some("ident"));
        for (a, b) in loaded.entries().iter().zip(cube.entries()) {
            for c in 0..3 {
                assert!((a[c] - b[c]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(read_3d("/nonexistent/none.cube"), Err(LutError::Io(_))));
    }
}
