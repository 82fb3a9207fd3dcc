#![forbid(unsafe_code)]

//! Geometric primitives for the menu surface.
//!
//! All coordinates are container-local pixel units (f64, origin at the
//! container's top-left). [`Rect`] describes element placement; [`Transform2D`]
//! describes a relative `translate(...) scale(...)` pair applied about an
//! element's center, matching the CSS transform model the mobile animation
//! strategy targets.
//!
//! # Invariants
//!
//! 1. A [`Rect`] produced by resolution always has non-negative width/height.
//! 2. `Transform2D::between(dest, start).apply(dest)` reproduces `start`
//!    within floating-point tolerance.
//! 3. Degenerate destination sizes never divide by zero; the scale factor
//!    defaults to 1.

/// An axis-aligned rectangle in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Distance from the container's top edge.
    pub top: f64,
    /// Distance from the container's left edge.
    pub left: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point as `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Width divided by height, or 0 when the height is degenerate.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Whether the rectangle has a strictly positive area.
    ///
    /// Zero-size rects come from unmounted or transiently unmeasurable
    /// elements; resolution must skip them.
    #[inline]
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Build a rectangle of the given size centered inside `container_width`
    /// x `container_height`.
    #[must_use]
    pub fn centered_in(container_width: f64, container_height: f64, width: f64, height: f64) -> Self {
        Self {
            top: (container_height - height) / 2.0,
            left: (container_width - width) / 2.0,
            width,
            height,
        }
    }

    /// Linear interpolation between two rectangles, `t` clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, other: &Rect, t: f64) -> Rect {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Rect {
            top: mix(self.top, other.top),
            left: mix(self.left, other.left),
            width: mix(self.width, other.width),
            height: mix(self.height, other.height),
        }
    }
}

/// Fit the largest `ratio`-shaped size inside `max_width` x `max_height`.
///
/// The result fills the width unless the implied height overflows the cap,
/// in which case the height bound wins and the width shrinks to match.
#[must_use]
pub fn fit_aspect(max_width: f64, max_height: f64, ratio: f64) -> (f64, f64) {
    let mut width = max_width.max(0.0);
    let mut height = if ratio > 0.0 { width / ratio } else { 0.0 };
    if height > max_height {
        height = max_height.max(0.0);
        width = height * ratio;
    }
    (width, height)
}

// ---------------------------------------------------------------------------
// Transform2D
// ---------------------------------------------------------------------------

/// A relative `translate(tx, ty) scale(sx, sy)` pair about an element's center.
///
/// Applied to an element laid out at some destination rectangle, the transform
/// moves the element's center by the translation and scales its size in place,
/// which is how the mobile strategy paints the start framing without touching
/// layout properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform2D {
    /// The no-op transform.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Compute the transform that visually maps `dest` onto `start`.
    ///
    /// Scale is the per-axis size ratio; translation is the difference of
    /// centers. Degenerate `dest` sizes fall back to a scale of 1.
    #[must_use]
    pub fn between(dest: &Rect, start: &Rect) -> Self {
        let scale_x = if dest.width > 0.0 {
            start.width / dest.width
        } else {
            1.0
        };
        let scale_y = if dest.height > 0.0 {
            start.height / dest.height
        } else {
            1.0
        };
        let (dest_cx, dest_cy) = dest.center();
        let (start_cx, start_cy) = start.center();
        Self {
            scale_x,
            scale_y,
            translate_x: start_cx - dest_cx,
            translate_y: start_cy - dest_cy,
        }
    }

    /// Apply the transform to `rect`, returning the visually resulting rect.
    #[must_use]
    pub fn apply(&self, rect: &Rect) -> Rect {
        let (cx, cy) = rect.center();
        let width = rect.width * self.scale_x;
        let height = rect.height * self.scale_y;
        Rect {
            top: cy + self.translate_y - height / 2.0,
            left: cx + self.translate_x - width / 2.0,
            width,
            height,
        }
    }

    /// Whether this is (exactly) the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
