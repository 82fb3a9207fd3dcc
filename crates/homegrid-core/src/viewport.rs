#![forbid(unsafe_code)]

//! Viewport mode selection.
//!
//! [`ViewMode`] picks one of two structurally different animation strategies
//! from the viewport width against a single fixed breakpoint. Desktop
//! interpolates layout rectangles directly; mobile interpolates a relative
//! transform over a fixed destination rect, which is cheaper on constrained
//! devices.
//!
//! The mode is re-derived on every resize event. A mode change invalidates
//! any held geometry snapshot (it was computed for the other strategy).

/// Width at or above which the desktop strategy applies, in pixel units.
pub const DESKTOP_BREAKPOINT: f64 = 1024.0;

/// Animation strategy selector derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Interpolate absolute layout rectangles.
    Desktop,
    /// Interpolate a relative transform over a fixed destination rect.
    Mobile,
}

impl ViewMode {
    /// Derive the mode from the current viewport width.
    #[must_use]
    pub fn from_width(viewport_width: f64) -> Self {
        if viewport_width >= DESKTOP_BREAKPOINT {
            Self::Desktop
        } else {
            Self::Mobile
        }
    }

    /// Horizontal margin as a fraction of container width.
    #[must_use]
    pub fn margin_x_fraction(self) -> f64 {
        match self {
            Self::Desktop => 0.08,
            Self::Mobile => 0.05,
        }
    }

    /// Maximum destination height as a fraction of container height.
    #[must_use]
    pub fn height_cap_fraction(self) -> f64 {
        match self {
            Self::Desktop => 0.82,
            Self::Mobile => 0.75,
        }
    }

    #[must_use]
    pub fn is_desktop(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::Mobile => write!(f, "mobile"),
        }
    }
}
