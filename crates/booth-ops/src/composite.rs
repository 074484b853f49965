//! Layer building for print composites.
//!
//! [`build_layers`] turns a [`Template`], a photo store and an optional
//! active [`ColorCube`] into the ordered list of [`DrawLayer`]s a rendering
//! surface paints: one photo layer per filled frame, in frame order, then
//! the template artwork on top.
//!
//! Nothing here aborts a composite. Problems with a single frame (missing
//! photo, zero-sized frame, unusable cube) are collected as
//! [`Condition`]s and the rest of the template is still built.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use booth_core::{Frame, RasterImage, Template};
//! use booth_ops::composite::{build_layers, LayerKind, Session};
//!
//! let template = Template::new(
//!     Some(RasterImage::new(100, 200)),
//!     vec![Frame::new("main", 0.0, 0.0, 100.0, 200.0).with_photo("a")],
//! );
//! let mut photos = HashMap::new();
//! photos.insert("a".to_string(), RasterImage::new(400, 200));
//!
//! let composite = build_layers(&template, &photos, None, Session::default());
//! assert_eq!(composite.layers.len(), 2);
//! assert_eq!(composite.layers[0].offset_x, 150.0);
//! assert!(matches!(composite.layers[1].kind, LayerKind::Background));
//! ```

use crate::fit::fit_frame;
use crate::{OpsError, OpsResult};
use booth_core::{Frame, FrameId, PhotoId, RasterImage, Template};
use booth_lut::ColorCube;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

/// 4R paper (4x6 in) at 300 dpi, portrait.
pub const PAPER_4R: (u32, u32) = (1200, 1800);

/// Per-run compositing settings.
///
/// Replaces what the operator UI keeps as global state: every value the
/// pipeline needs is passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    /// Template units to surface pixels
    pub scale: f64,
    /// Output canvas size in surface pixels
    pub canvas: (u32, u32),
}

impl Default for Session {
    fn default() -> Self {
        Self {
            scale: 1.0,
            canvas: PAPER_4R,
        }
    }
}

impl Session {
    /// Session with a display scale and the canvas scaled to match.
    pub fn scaled(scale: f64) -> Self {
        let (w, h) = PAPER_4R;
        Self {
            scale,
            canvas: (
                (w as f64 * scale).round() as u32,
                (h as f64 * scale).round() as u32,
            ),
        }
    }
}

/// Resolves photo ids to rasters.
///
/// Implemented by whatever owns the decoded photos; the pipeline only
/// reads from it.
pub trait PhotoStore {
    /// Returns the raster for `id`, or `None` if it is not available.
    fn photo(&self, id: &str) -> Option<RasterImage>;
}

impl PhotoStore for HashMap<PhotoId, RasterImage> {
    fn photo(&self, id: &str) -> Option<RasterImage> {
        self.get(id).cloned()
    }
}

/// What a layer shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// A photo clipped to a frame
    Photo {
        /// Frame the photo fills
        frame_id: FrameId,
    },
    /// Template artwork, drawn above all photos
    Background,
}

/// One drawing instruction for a rendering surface.
///
/// The image is drawn at `(x - offset_x, y - offset_y)` with size
/// `width x height`, clipped to `[x, x + clip_width) x [y, y + clip_height)`.
/// All values are surface pixels (template units times the session scale).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawLayer {
    /// Layer role
    pub kind: LayerKind,
    /// Source raster (filtered when a cube is active)
    pub image: RasterImage,
    /// Clip origin X
    pub x: f64,
    /// Clip origin Y
    pub y: f64,
    /// Drawn image width
    pub width: f64,
    /// Drawn image height
    pub height: f64,
    /// Clip window offset inside the drawn image, X
    pub offset_x: f64,
    /// Clip window offset inside the drawn image, Y
    pub offset_y: f64,
    /// Clip width
    pub clip_width: f64,
    /// Clip height
    pub clip_height: f64,
}

/// A problem recorded while building layers.
#[derive(Debug)]
pub struct Condition {
    /// Frame the condition belongs to, `None` for template-wide ones
    pub frame_id: Option<FrameId>,
    /// What went wrong
    pub error: OpsError,
}

/// Result of [`build_layers`].
#[derive(Debug, Default)]
pub struct Composite {
    /// Layers in paint order
    pub layers: Vec<DrawLayer>,
    /// Per-frame problems, in frame order
    pub conditions: Vec<Condition>,
    /// `true` if building stopped early on request
    pub cancelled: bool,
}

impl Composite {
    /// Number of photo layers.
    pub fn photo_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| matches!(l.kind, LayerKind::Photo { .. }))
            .count()
    }

    fn record(&mut self, frame_id: Option<&str>, error: OpsError) {
        warn!(frame = ?frame_id, %error, "composite condition");
        self.conditions.push(Condition {
            frame_id: frame_id.map(str::to_string),
            error,
        });
    }
}

/// Builds the paint-ordered layer list for a template.
///
/// See [`build_layers_with_cancel`] for cooperative cancellation.
pub fn build_layers<S: PhotoStore + ?Sized>(
    template: &Template,
    photos: &S,
    active_cube: Option<&ColorCube>,
    session: Session,
) -> Composite {
    let never = AtomicBool::new(false);
    build_layers_with_cancel(template, photos, active_cube, session, &never)
}

/// Builds the paint-ordered layer list, checking `cancel` before each
/// frame.
///
/// When cancelled, the photo layers built so far are returned, no
/// background layer is added and [`Composite::cancelled`] is set. Layers
/// are independent values, so a partial result is consistent.
pub fn build_layers_with_cancel<S: PhotoStore + ?Sized>(
    template: &Template,
    photos: &S,
    active_cube: Option<&ColorCube>,
    session: Session,
    cancel: &AtomicBool,
) -> Composite {
    trace!(frames = template.frames.len(), filtered = active_cube.is_some(), "composite::build_layers");

    let mut composite = Composite::default();
    // Frames sharing a photo share one filtered raster
    let mut filtered: HashMap<&str, RasterImage> = HashMap::new();
    let mut cube = active_cube;

    if let Some(c) = cube {
        if let Err(source) = c.ensure_usable() {
            composite.record(
                None,
                OpsError::Filter {
                    filter_id: c.title().unwrap_or("active").to_string(),
                    source,
                },
            );
            cube = None;
        }
    }

    for frame in &template.frames {
        if cancel.load(Ordering::Relaxed) {
            info!(built = composite.layers.len(), "composite cancelled");
            composite.cancelled = true;
            return composite;
        }

        let Some(photo_id) = frame.photo.as_deref() else {
            continue;
        };

        let image = match filtered.get(photo_id).cloned() {
            Some(img) => img,
            None => {
                let Some(raw) = photos.photo(photo_id) else {
                    composite.record(
                        Some(frame.id.as_str()),
                        OpsError::MissingPhoto {
                            frame_id: frame.id.clone(),
                            photo_id: photo_id.to_string(),
                        },
                    );
                    continue;
                };
                let img = match cube {
                    Some(c) => grade(raw, c),
                    None => raw,
                };
                filtered.insert(photo_id, img.clone());
                img
            }
        };

        match photo_layer(frame.id.clone(), image, frame, session.scale) {
            Ok(layer) => composite.layers.push(layer),
            Err(error) => composite.record(Some(frame.id.as_str()), error),
        }
    }

    if let Some(bg) = &template.background {
        composite.layers.push(background_layer(bg, session.scale));
    }

    debug!(
        layers = composite.layers.len(),
        conditions = composite.conditions.len(),
        "composite built"
    );
    composite
}

/// Applies the cube, keeping the unfiltered raster if that fails.
fn grade(raw: RasterImage, cube: &ColorCube) -> RasterImage {
    match booth_lut::apply(&raw, cube) {
        Ok(img) => img,
        Err(e) => {
            warn!(error = %e, "filter failed, using unfiltered photo");
            raw
        }
    }
}

fn photo_layer(
    frame_id: FrameId,
    image: RasterImage,
    frame: &Frame,
    scale: f64,
) -> OpsResult<DrawLayer> {
    let fit = fit_frame(&image, frame)?.scaled(scale);
    Ok(DrawLayer {
        kind: LayerKind::Photo { frame_id },
        image,
        x: frame.x * scale,
        y: frame.y * scale,
        width: fit.draw_width,
        height: fit.draw_height,
        offset_x: fit.draw_offset_x,
        offset_y: fit.draw_offset_y,
        clip_width: fit.clip_width,
        clip_height: fit.clip_height,
    })
}

fn background_layer(bg: &RasterImage, scale: f64) -> DrawLayer {
    let width = bg.width() as f64 * scale;
    let height = bg.height() as f64 * scale;
    DrawLayer {
        kind: LayerKind::Background,
        image: bg.clone(),
        x: 0.0,
        y: 0.0,
        width,
        height,
        offset_x: 0.0,
        offset_y: 0.0,
        clip_width: width,
        clip_height: height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos() -> HashMap<PhotoId, RasterImage> {
        let mut map = HashMap::new();
        map.insert("wide".to_string(), RasterImage::filled(400, 200, [100, 150, 200, 255]));
        map.insert("square".to_string(), RasterImage::filled(100, 100, [10, 20, 30, 255]));
        map
    }

    fn template() -> Template {
        Template::new(
            Some(RasterImage::filled(300, 400, [255, 255, 255, 0])),
            vec![
                Frame::new("a", 0.0, 0.0, 100.0, 200.0).with_photo("wide"),
                Frame::new("empty", 100.0, 0.0, 100.0, 200.0),
                Frame::new("b", 200.0, 0.0, 100.0, 200.0).with_photo("square"),
            ],
        )
    }

    fn frame_ids(c: &Composite) -> Vec<Option<&str>> {
        c.layers
            .iter()
            .map(|l| match &l.kind {
                LayerKind::Photo { frame_id } => Some(frame_id.as_str()),
                LayerKind::Background => None,
            })
            .collect()
    }

    #[test]
    fn test_order_and_geometry() {
        let c = build_layers(&template(), &photos(), None, Session::default());
        assert!(c.conditions.is_empty());
        assert_eq!(frame_ids(&c), vec![Some("a"), Some("b"), None]);

        let a = &c.layers[0];
        assert_eq!((a.x, a.y), (0.0, 0.0));
        assert_eq!((a.width, a.height), (400.0, 200.0));
        assert_eq!((a.offset_x, a.offset_y), (150.0, 0.0));
        assert_eq!((a.clip_width, a.clip_height), (100.0, 200.0));

        let b = &c.layers[1];
        assert_eq!((b.x, b.width, b.height, b.offset_x), (200.0, 200.0, 200.0, 50.0));

        let bg = &c.layers[2];
        assert_eq!((bg.width, bg.height, bg.clip_width), (300.0, 400.0, 300.0));
    }

    #[test]
    fn test_missing_photo_is_skipped() {
        let mut t = template();
        t.frames[0].assign("gone");
        let c = build_layers(&t, &photos(), None, Session::default());
        assert_eq!(frame_ids(&c), vec![Some("b"), None]);
        assert_eq!(c.conditions.len(), 1);
        assert_eq!(c.conditions[0].frame_id.as_deref(), Some("a"));
        assert!(matches!(c.conditions[0].error, OpsError::MissingPhoto { .. }));
    }

    #[test]
    fn test_zero_area_frame_is_skipped() {
        let mut t = template();
        t.frames[2].height = 0.0;
        let c = build_layers(&t, &photos(), None, Session::default());
        assert_eq!(frame_ids(&c), vec![Some("a"), None]);
        assert!(matches!(c.conditions[0].error, OpsError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_cube_is_applied() {
        let cube = ColorCube::new(2, vec![[1.0, 0.0, 0.0]; 8]);
        let c = build_layers(&template(), &photos(), Some(&cube), Session::default());
        assert_eq!(c.layers[0].image.pixel(0, 0), [255, 0, 0, 255]);
        // Background is never graded
        assert_eq!(c.layers[2].image.pixel(0, 0), [255, 255, 255, 0]);
    }

    #[test]
    fn test_degenerate_cube_falls_back() {
        let cube = ColorCube::new(1, vec![[1.0, 0.0, 0.0]]);
        let c = build_layers(&template(), &photos(), Some(&cube), Session::default());
        assert_eq!(c.photo_count(), 2);
        assert_eq!(c.layers[0].image.pixel(0, 0), [100, 150, 200, 255]);
        assert_eq!(c.conditions.len(), 1);
        assert!(c.conditions[0].frame_id.is_none());
        assert!(matches!(c.conditions[0].error, OpsError::Filter { .. }));
    }

    #[test]
    fn test_shared_photo_filtered_once() {
        let mut t = template();
        t.frames[2].assign("wide");
        let cube = ColorCube::identity(3);
        let c = build_layers(&t, &photos(), Some(&cube), Session::default());
        assert!(c.layers[0].image.shares_buffer(&c.layers[1].image));
    }

    #[test]
    fn test_scale_applies_everywhere() {
        let session = Session::scaled(0.5);
        assert_eq!(session.canvas, (600, 900));
        let c = build_layers(&template(), &photos(), None, session);
        let b = &c.layers[1];
        assert_eq!((b.x, b.y), (100.0, 0.0));
        assert_eq!((b.width, b.height), (100.0, 100.0));
        assert_eq!((b.offset_x, b.clip_width, b.clip_height), (25.0, 50.0, 100.0));
        assert_eq!(c.layers[2].width, 150.0);
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = AtomicBool::new(true);
        let c = build_layers_with_cancel(&template(), &photos(), None, Session::default(), &cancel);
        assert!(c.cancelled);
        assert!(c.layers.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let cube = ColorCube::identity(5);
        let a = build_layers(&template(), &photos(), Some(&cube), Session::default());
        let b = build_layers(&template(), &photos(), Some(&cube), Session::default());
        assert_eq!(a.layers, b.layers);
    }

    #[test]
    fn test_no_background() {
        let mut t = template();
        t.background = None;
        let c = build_layers(&t, &photos(), None, Session::default());
        assert_eq!(frame_ids(&c), vec![Some("a"), Some("b")]);
    }
}
