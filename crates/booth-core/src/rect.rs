//! Integer pixel rectangles.
//!
//! Coordinates use the image convention: origin (0, 0) at the top-left,
//! X to the right, Y downward. Left/top edges are inclusive, right/bottom
//! edges exclusive.
//!
//! ```rust
//! use booth_core::Rect;
//!
//! let rect = Rect::new(10, 20, 100, 50);
//! assert!(rect.contains(15, 25));
//! assert!(!rect.contains(5, 25));
//!
//! let other = Rect::new(50, 40, 100, 50);
//! assert_eq!(rect.intersect(&other), Some(Rect::new(50, 40, 60, 30)));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Snaps a floating-point rectangle to whole pixels.
    ///
    /// Each edge is rounded half away from zero and clamped to `0..=u32::MAX`,
    /// so two rectangles sharing an edge in surface space share it in pixels
    /// too.
    ///
    /// ```rust
    /// use booth_core::Rect;
    ///
    /// assert_eq!(Rect::snap(9.5, 0.4, 10.0, 10.0), Rect::new(10, 0, 10, 10));
    /// assert_eq!(Rect::snap(-5.0, -5.0, 10.0, 10.0), Rect::new(0, 0, 5, 5));
    /// ```
    pub fn snap(x: f64, y: f64, width: f64, height: f64) -> Self {
        let max = f64::from(u32::MAX);
        let left = x.round().max(0.0).min(max);
        let top = y.round().max(0.0).min(max);
        let right = (x + width).round().max(left).min(max);
        let bottom = (y + height).round().max(top).min(max);
        Self::new(
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }

    /// Returns the X coordinate of the right edge (exclusive), saturating
    /// at `u32::MAX`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the Y coordinate of the bottom edge (exclusive), saturating
    /// at `u32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the area of the rectangle in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the intersection of this rectangle with another, or `None`
    /// if they don't overlap.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.area(), 5000);
        assert!(!rect.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(10, 10, 100, 100);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(109, 109));
        assert!(!rect.contains(110, 110));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
        assert_eq!(a.intersect(&Rect::new(200, 200, 5, 5)), None);
    }

    #[test]
    fn test_snap_shared_edges() {
        let left = Rect::snap(0.0, 0.0, 33.4, 10.0);
        let right = Rect::snap(33.4, 0.0, 33.4, 10.0);
        assert_eq!(left.right(), right.x);
    }

    #[test]
    fn test_snap_saturates_huge_edges() {
        let wide = Rect::snap(1.0, 0.0, 5.0e9, 10.0);
        assert_eq!(wide.x, 1);
        assert_eq!(wide.right(), u32::MAX);
        assert_eq!(wide.intersect(&Rect::from_size(8, 8)), Some(Rect::new(1, 0, 7, 8)));

        let far = Rect::snap(1.0e12, 1.0e12, 10.0, 10.0);
        assert!(far.is_empty());
        assert_eq!(far.intersect(&Rect::from_size(8, 8)), None);
    }

    #[test]
    fn test_edges_saturate() {
        let rect = Rect::new(u32::MAX - 2, 5, 10, u32::MAX);
        assert_eq!(rect.right(), u32::MAX);
        assert_eq!(rect.bottom(), u32::MAX);
    }
}
