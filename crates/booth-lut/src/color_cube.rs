//! 3-dimensional color lookup table.
//!
//! A [`ColorCube`] maps an input RGB triple to an output RGB triple through
//! an `N x N x N` grid of samples, blending the 8 grid points around the
//! input with trilinear weights.
//!
//! # Layout
//!
//! Entries are kept in file order. Entry `k` sits at grid coordinate
//! `(x, y, z)` with red on `x` (slowest) and blue on `z` (fastest):
//!
//! ```text
//! k = x * N² + y * N + z
//! x = k / N²,  y = (k / N) mod N,  z = k mod N
//! ```
//!
//! # Domain
//!
//! `DOMAIN_MIN` / `DOMAIN_MAX` are stored but not used to remap input:
//! lookups always treat the input as `[0, 1]`.

use crate::{LutError, LutResult};

/// Immutable 3D lookup table.
///
/// Shared read-only between threads once built.
///
/// # Example
///
/// ```rust
/// use booth_lut::ColorCube;
///
/// let cube = ColorCube::identity(17);
/// let out = cube.sample([0.5, 0.3, 0.8]);
/// assert!((out[0] - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCube {
    size: usize,
    entries: Vec<[f32; 3]>,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
    title: Option<String>,
}

impl ColorCube {
    /// Creates a cube from entries in red-major order.
    ///
    /// The entry count is not enforced; use [`check`](Self::check) to
    /// report a mismatch.
    pub fn new(size: usize, entries: Vec<[f32; 3]>) -> Self {
        Self {
            size,
            entries,
            domain_min: [0.0, 0.0, 0.0],
            domain_max: [1.0, 1.0, 1.0],
            title: None,
        }
    }

    /// Creates an identity (pass-through) cube.
    ///
    /// `entry(x, y, z) = (x, y, z) / (size - 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 2, "identity cube needs size >= 2");
        let n = (size - 1) as f32;
        let mut entries = Vec::with_capacity(size * size * size);
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    entries.push([x as f32 / n, y as f32 / n, z as f32 / n]);
                }
            }
        }
        Self::new(size, entries)
    }

    /// Sets the stored input domain.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Grid edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entries in file (red-major) order.
    #[inline]
    pub fn entries(&self) -> &[[f32; 3]] {
        &self.entries
    }

    /// Stored `DOMAIN_MIN`.
    #[inline]
    pub fn domain_min(&self) -> [f32; 3] {
        self.domain_min
    }

    /// Stored `DOMAIN_MAX`.
    #[inline]
    pub fn domain_max(&self) -> [f32; 3] {
        self.domain_max
    }

    /// Title from the `TITLE` line, if any.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of entries a complete cube of this size holds.
    #[inline]
    pub fn expected_entries(&self) -> usize {
        self.size.saturating_mul(self.size).saturating_mul(self.size)
    }

    /// Reports [`LutError::SizeMismatch`] when the entry count is not `size³`.
    pub fn check(&self) -> LutResult<()> {
        let expected = self.expected_entries();
        if self.entries.len() != expected {
            return Err(LutError::SizeMismatch {
                expected,
                found: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Fails with [`LutError::DegenerateCube`] if the cube cannot be sampled.
    pub fn ensure_usable(&self) -> LutResult<()> {
        if self.size < 2 || self.entries.is_empty() {
            return Err(LutError::DegenerateCube {
                size: self.size,
                entries: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Returns the entry at grid coordinate (x, y, z).
    ///
    /// The flat index is clamped to the last entry, so short tables stay
    /// readable.
    ///
    /// # Panics
    ///
    /// Panics if the cube has no entries.
    #[inline]
    pub fn entry(&self, x: usize, y: usize, z: usize) -> [f32; 3] {
        let k = (x * self.size + y) * self.size + z;
        self.entries[k.min(self.entries.len() - 1)]
    }

    /// Trilinearly interpolates the cube at a normalized RGB coordinate.
    ///
    /// Inputs are clamped to `[0, 1]`. A cube that fails
    /// [`ensure_usable`](Self::ensure_usable) with no entries or size 0
    /// returns the clamped input unchanged.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let rgb = rgb.map(|v| v.clamp(0.0, 1.0));
        if self.size == 0 || self.entries.is_empty() {
            return rgb;
        }
        let last = self.size - 1;
        let n = last as f32;

        let mut i0 = [0usize; 3];
        let mut i1 = [0usize; 3];
        let mut d = [0.0f32; 3];
        for axis in 0..3 {
            let g = rgb[axis] * n;
            let lo = (g.floor() as usize).min(last);
            i0[axis] = lo;
            i1[axis] = (lo + 1).min(last);
            d[axis] = g - lo as f32;
        }

        let c000 = self.entry(i0[0], i0[1], i0[2]);
        let c001 = self.entry(i0[0], i0[1], i1[2]);
        let c010 = self.entry(i0[0], i1[1], i0[2]);
        let c011 = self.entry(i0[0], i1[1], i1[2]);
        let c100 = self.entry(i1[0], i0[1], i0[2]);
        let c101 = self.entry(i1[0], i0[1], i1[2]);
        let c110 = self.entry(i1[0], i1[1], i0[2]);
        let c111 = self.entry(i1[0], i1[1], i1[2]);

        // Nested lerps along red, green, then blue. Equal corners come back
        // bit-exact, so flat regions of a cube round the same everywhere.
        let (xd, yd, zd) = (d[0], d[1], d[2]);
        let mut result = [0.0f32; 3];
        for i in 0..3 {
            let c00 = lerp(c000[i], c100[i], xd);
            let c01 = lerp(c001[i], c101[i], xd);
            let c10 = lerp(c010[i], c110[i], xd);
            let c11 = lerp(c011[i], c111[i], xd);

            let c0 = lerp(c00, c10, yd);
            let c1 = lerp(c01, c11, yd);

            result[i] = lerp(c0, c1, zd);
        }
        result
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
