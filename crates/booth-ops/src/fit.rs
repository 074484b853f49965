//! Cover fitting of photos into frames.
//!
//! A photo is scaled uniformly until it covers the whole frame, then the
//! frame acts as a clip window into the scaled photo. The excess on the
//! long axis is centered unless the frame carries a pan offset for that
//! axis.
//!
//! ```text
//!  draw_offset_x
//!  |<->|
//!  +---+-----------+---+
//!  |   |   frame   |   |   <- scaled photo (draw_width x draw_height)
//!  |   | (clip)    |   |
//!  +---+-----------+---+
//! ```
//!
//! # Pan Offsets
//!
//! A pan of exactly `0.0` means "auto-center" on that axis. Only the axis
//! with excess is auto-centered; the other axis takes the pan value as is.
//!
//! # Example
//!
//! ```rust
//! use booth_ops::fit::fit;
//!
//! // 400x200 photo into a 100x200 portrait frame
//! let r = fit(400, 200, 100.0, 200.0, 0.0, 0.0).unwrap();
//! assert_eq!((r.draw_width, r.draw_height), (400.0, 200.0));
//! assert_eq!((r.draw_offset_x, r.draw_offset_y), (150.0, 0.0));
//! ```

use crate::{OpsError, OpsResult};
use booth_core::{Frame, RasterImage};

/// Draw geometry for one photo inside one frame.
///
/// All values are in the frame's units. Recomputed on every composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Scaled photo width
    pub draw_width: f64,
    /// Scaled photo height
    pub draw_height: f64,
    /// Horizontal offset of the clip window inside the scaled photo
    pub draw_offset_x: f64,
    /// Vertical offset of the clip window inside the scaled photo
    pub draw_offset_y: f64,
    /// Clip width (always the frame width)
    pub clip_width: f64,
    /// Clip height (always the frame height)
    pub clip_height: f64,
}

impl FitResult {
    /// Multiplies every length by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            draw_width: self.draw_width * factor,
            draw_height: self.draw_height * factor,
            draw_offset_x: self.draw_offset_x * factor,
            draw_offset_y: self.draw_offset_y * factor,
            clip_width: self.clip_width * factor,
            clip_height: self.clip_height * factor,
        }
    }
}

/// Computes the cover fit of an `image_width x image_height` photo in a
/// `frame_width x frame_height` frame.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if either image side is zero or the
/// frame has no positive, finite area.
pub fn fit(
    image_width: u32,
    image_height: u32,
    frame_width: f64,
    frame_height: f64,
    pan_x: f64,
    pan_y: f64,
) -> OpsResult<FitResult> {
    let frame_ok = frame_width.is_finite()
        && frame_height.is_finite()
        && frame_width > 0.0
        && frame_height > 0.0;
    if image_width == 0 || image_height == 0 || !frame_ok {
        return Err(OpsError::InvalidDimensions {
            image_width,
            image_height,
            frame_width,
            frame_height,
        });
    }

    let image_aspect = image_width as f64 / image_height as f64;
    let frame_aspect = frame_width / frame_height;

    let (draw_width, draw_height, draw_offset_x, draw_offset_y);
    if image_aspect > frame_aspect {
        // Relatively wider: match heights, crop left/right
        draw_height = frame_height;
        draw_width = draw_height * image_aspect;
        draw_offset_x = if pan_x == 0.0 {
            (draw_width - frame_width) / 2.0
        } else {
            pan_x
        };
        draw_offset_y = pan_y;
    } else {
        // Relatively taller (or equal): match widths, crop top/bottom
        draw_width = frame_width;
        draw_height = draw_width / image_aspect;
        draw_offset_y = if pan_y == 0.0 {
            (draw_height - frame_height) / 2.0
        } else {
            pan_y
        };
        draw_offset_x = pan_x;
    }

    Ok(FitResult {
        draw_width,
        draw_height,
        draw_offset_x,
        draw_offset_y,
        clip_width: frame_width,
        clip_height: frame_height,
    })
}

/// [`fit`] for a raster and a frame, using the frame's pan.
pub fn fit_frame(image: &RasterImage, frame: &Frame) -> OpsResult<FitResult> {
    fit(
        image.width(),
        image.height(),
        frame.width,
        frame.height,
        frame.pan_x,
        frame.pan_y,
    )
}

/// Uniform scale factor that makes the photo cover the frame:
/// `max(frame_w / image_w, frame_h / image_h)`.
///
/// Returns `None` for the same inputs [`fit`] rejects.
pub fn cover_scale(image_width: u32, image_height: u32, frame_width: f64, frame_height: f64) -> Option<f64> {
    fit(image_width, image_height, frame_width, frame_height, 0.0, 0.0)
        .ok()
        .map(|r| r.draw_width / image_width as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wide_image_in_portrait_frame() {
        let r = fit(400, 200, 100.0, 200.0, 0.0, 0.0).unwrap();
        assert_eq!(r.draw_height, 200.0);
        assert_eq!(r.draw_width, 400.0);
        assert_eq!(r.draw_offset_x, 150.0);
        assert_eq!(r.draw_offset_y, 0.0);
        assert_eq!((r.clip_width, r.clip_height), (100.0, 200.0));
    }

    #[test]
    fn test_square_image_in_portrait_frame() {
        let r = fit(100, 100, 100.0, 200.0, 0.0, 0.0).unwrap();
        assert_eq!((r.draw_width, r.draw_height), (200.0, 200.0));
        assert_eq!(r.draw_offset_x, 50.0);
        assert_eq!(r.draw_offset_y, 0.0);
    }

    #[test]
    fn test_tall_image_centers_vertically() {
        let r = fit(100, 400, 200.0, 200.0, 0.0, 0.0).unwrap();
        assert_eq!((r.draw_width, r.draw_height), (200.0, 800.0));
        assert_eq!(r.draw_offset_x, 0.0);
        assert_eq!(r.draw_offset_y, 300.0);
    }

    #[test]
    fn test_equal_aspect() {
        let r = fit(640, 480, 320.0, 240.0, 0.0, 0.0).unwrap();
        assert_eq!(r.draw_width, 320.0);
        assert_relative_eq!(r.draw_width / r.draw_height, 320.0 / 240.0, epsilon = 1e-12);
        assert_eq!((r.draw_offset_x, r.draw_offset_y), (0.0, 0.0));
    }

    #[test]
    fn test_manual_pan_overrides_centering() {
        let r = fit(400, 200, 100.0, 200.0, 20.0, 5.0).unwrap();
        assert_eq!(r.draw_offset_x, 20.0);
        assert_eq!(r.draw_offset_y, 5.0);

        // Pan on the short axis alone keeps the long axis centered
        let r = fit(400, 200, 100.0, 200.0, 0.0, 7.0).unwrap();
        assert_eq!(r.draw_offset_x, 150.0);
        assert_eq!(r.draw_offset_y, 7.0);
    }

    #[test]
    fn test_idempotent() {
        let a = fit(1234, 567, 89.5, 101.25, 3.0, 0.0).unwrap();
        let b = fit(1234, 567, 89.5, 101.25, 3.0, 0.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_dimensions() {
        for (iw, ih, fw, fh) in [
            (0, 10, 10.0, 10.0),
            (10, 0, 10.0, 10.0),
            (10, 10, 0.0, 10.0),
            (10, 10, 10.0, 0.0),
            (10, 10, -5.0, 10.0),
            (10, 10, f64::INFINITY, 10.0),
        ] {
            assert!(
                matches!(fit(iw, ih, fw, fh, 0.0, 0.0), Err(OpsError::InvalidDimensions { .. })),
                "accepted {}x{} in {}x{}",
                iw,
                ih,
                fw,
                fh
            );
        }
    }

    #[test]
    fn test_cover_scale_matches_max_ratio() {
        for (iw, ih, fw, fh) in [(400, 200, 100.0, 200.0), (100, 400, 200.0, 200.0), (333, 777, 50.0, 20.0)] {
            let s = cover_scale(iw, ih, fw, fh).unwrap();
            let expected = f64::max(fw / iw as f64, fh / ih as f64);
            assert_relative_eq!(s, expected, epsilon = 1e-12);
        }
        assert!(cover_scale(0, 1, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_scaled() {
        let r = fit(400, 200, 100.0, 200.0, 0.0, 0.0).unwrap().scaled(0.5);
        assert_eq!((r.draw_width, r.draw_offset_x, r.clip_height), (200.0, 75.0, 100.0));
    }
}
