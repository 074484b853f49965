//! CLI command implementations

pub mod batch;
pub mod compose;
pub mod fit;
pub mod frame;
pub mod identity;
pub mod layers;
pub mod lut;
pub mod previews;

use crate::SessionOpts;
use anyhow::{bail, Context, Result};
use booth_core::{RasterImage, Rgba8};
use booth_io::LoadedSession;
use booth_ops::{resolve_filter, Condition, ResolvedFilter, Session};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

/// Load image from path
pub fn load_image(path: &Path) -> Result<RasterImage> {
    booth_io::read_image(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &RasterImage) -> Result<()> {
    booth_io::write_image(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// A session with command line overrides applied and its filter resolved.
pub struct Job {
    pub loaded: LoadedSession,
    pub session: Session,
    pub filter_id: String,
    pub filter: ResolvedFilter,
}

/// Loads a session, applies `--filter`/`--scale` and resolves the filter.
pub fn open_session(opts: &SessionOpts) -> Result<Job> {
    let loaded = booth_io::load_session(&opts.session)
        .with_context(|| format!("Failed to load session: {}", opts.session.display()))?;

    let mut session = loaded.session();
    if let Some(scale) = opts.scale {
        if !(scale.is_finite() && scale > 0.0) {
            bail!("--scale must be positive, got {}", scale);
        }
        let (w, h) = session.canvas;
        let factor = scale / session.scale;
        session.canvas = (
            (w as f64 * factor).round() as u32,
            (h as f64 * factor).round() as u32,
        );
        session.scale = scale;
    }

    let filter_id = opts.filter.clone().unwrap_or_else(|| loaded.filter().to_string());
    let filter = resolve_filter(&loaded.catalog, &filter_id, booth_io::load_cube);
    debug!(filter = %filter_id, active = filter.cube.is_some(), scale = session.scale, "session opened");

    Ok(Job {
        loaded,
        session,
        filter_id,
        filter,
    })
}

/// Prints a composite condition for the operator.
pub fn report(condition: &Condition) {
    match &condition.frame_id {
        Some(frame) => eprintln!("Warning: frame {}: {}", frame, condition.error),
        None => eprintln!("Warning: {}", condition.error),
    }
}

/// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
pub fn parse_color(s: &str) -> Result<Rgba8> {
    let hex = s.trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        bail!("Invalid color {:?}, expected RRGGBB or RRGGBBAA", s);
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("Invalid color {:?}", s))
    };
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok([byte(0)?, byte(2)?, byte(4)?, alpha])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("ffffff").unwrap(), [255, 255, 255, 255]);
        assert_eq!(parse_color("#10203040").unwrap(), [0x10, 0x20, 0x30, 0x40]);
        assert!(parse_color("fff").is_err());
        assert!(parse_color("gggggg").is_err());
    }
}
