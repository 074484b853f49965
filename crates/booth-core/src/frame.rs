//! Template frames.
//!
//! A [`Template`] is a background artwork plus an ordered list of
//! [`Frame`]s. Each frame is a rectangle in template units that holds at
//! most one photo, referenced by [`PhotoId`], and a pan offset that moves
//! the visible crop inside the fitted photo.
//!
//! # Pan Offsets
//!
//! A pan of `0.0` on an axis means "auto-center on that axis". A photo
//! deliberately panned to exactly zero therefore cannot be told apart from
//! one that was never panned; [`Frame::has_manual_pan`] reports what the
//! stored values imply and nothing more.
//!
//! ```rust
//! use booth_core::Frame;
//!
//! let mut frame = Frame::new("top", 0.0, 0.0, 100.0, 200.0);
//! frame.assign("IMG_0001.jpg");
//! frame.pan(12.0, 0.0);
//! assert!(frame.has_manual_pan());
//!
//! frame.unassign();
//! assert!(frame.photo.is_none());
//! assert!(!frame.has_manual_pan());
//! ```

use crate::RasterImage;

/// Stable identifier of a frame within its template.
pub type FrameId = String;

/// Identifier of a photo in the caller's photo store.
pub type PhotoId = String;

/// Rectangular region of a template that holds one photo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Stable identifier
    pub id: FrameId,
    /// Left edge in template units
    pub x: f64,
    /// Top edge in template units
    pub y: f64,
    /// Width in template units
    pub width: f64,
    /// Height in template units
    pub height: f64,
    /// Assigned photo, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub photo: Option<PhotoId>,
    /// Horizontal pan inside the fitted photo (0 = auto-center)
    #[cfg_attr(feature = "serde", serde(default))]
    pub pan_x: f64,
    /// Vertical pan inside the fitted photo (0 = auto-center)
    #[cfg_attr(feature = "serde", serde(default))]
    pub pan_y: f64,
}

impl Frame {
    /// Creates an empty frame with no photo and no pan.
    pub fn new(id: impl Into<FrameId>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            photo: None,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Builder form of [`assign`](Self::assign).
    pub fn with_photo(mut self, photo: impl Into<PhotoId>) -> Self {
        self.assign(photo);
        self
    }

    /// Assigns a photo and resets the pan to auto-center.
    pub fn assign(&mut self, photo: impl Into<PhotoId>) {
        self.photo = Some(photo.into());
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Removes the photo and resets the pan.
    pub fn unassign(&mut self) {
        self.photo = None;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Sets the pan offset. Ignored when no photo is assigned.
    pub fn pan(&mut self, pan_x: f64, pan_y: f64) {
        if self.photo.is_some() {
            self.pan_x = pan_x;
            self.pan_y = pan_y;
        }
    }

    /// Returns `true` if either pan axis holds a non-zero offset.
    #[inline]
    pub fn has_manual_pan(&self) -> bool {
        self.pan_x != 0.0 || self.pan_y != 0.0
    }

    /// Returns `true` if the frame has a positive, finite area.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A print template: background artwork over an ordered list of frames.
///
/// The background is drawn above the photos; frames are cut-outs in it.
#[derive(Debug, Clone, Default)]
pub struct Template {
    /// Template artwork, if loaded
    pub background: Option<RasterImage>,
    /// Frames in declaration order
    pub frames: Vec<Frame>,
}

impl Template {
    /// Creates a template from its background and frames.
    pub fn new(background: Option<RasterImage>, frames: Vec<Frame>) -> Self {
        Self { background, frames }
    }

    /// Looks up a frame by id.
    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Looks up a frame by id for mutation.
    pub fn frame_mut(&mut self, id: &str) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    /// Number of frames holding a photo.
    pub fn assigned_count(&self) -> usize {
        self.frames.iter().filter(|f| f.photo.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_resets_pan() {
        let mut frame = Frame::new("a", 0.0, 0.0, 10.0, 10.0).with_photo("p1");
        frame.pan(3.0, 4.0);
        assert_eq!((frame.pan_x, frame.pan_y), (3.0, 4.0));

        frame.assign("p2");
        assert_eq!(frame.photo.as_deref(), Some("p2"));
        assert_eq!((frame.pan_x, frame.pan_y), (0.0, 0.0));
    }

    #[test]
    fn test_pan_without_photo_is_ignored() {
        let mut frame = Frame::new("a", 0.0, 0.0, 10.0, 10.0);
        frame.pan(3.0, 4.0);
        assert!(!frame.has_manual_pan());
    }

    #[test]
    fn test_has_area() {
        assert!(Frame::new("a", 0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Frame::new("a", 0.0, 0.0, 0.0, 1.0).has_area());
        assert!(!Frame::new("a", 0.0, 0.0, f64::NAN, 1.0).has_area());
    }

    #[test]
    fn test_template_lookup() {
        let mut template = Template::new(
            None,
            vec![
                Frame::new("left", 0.0, 0.0, 10.0, 10.0).with_photo("p"),
                Frame::new("right", 10.0, 0.0, 10.0, 10.0),
            ],
        );
        assert_eq!(template.assigned_count(), 1);
        if let Some(frame) = template.frame_mut("right") {
            frame.assign("q");
        }
        assert_eq!(template.frame("right").and_then(|f| f.photo.as_deref()), Some("q"));
        assert!(template.frame("missing").is_none());
    }
}
