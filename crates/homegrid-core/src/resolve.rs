#![forbid(unsafe_code)]

//! Geometry resolution: from a measured tile rect to an animation snapshot.
//!
//! [`resolve`] is a pure function mapping a source element's on-screen
//! rectangle plus the current viewport width to a [`GeometrySnapshot`]
//! describing where the morphing element starts and ends. The snapshot is
//! a tagged variant per [`ViewMode`]:
//!
//! - [`GeometrySnapshot::Layout`] (desktop): literal start/end rectangles,
//!   interpolated via layout properties.
//! - [`GeometrySnapshot::Transform`] (mobile): a fixed destination rectangle
//!   plus the relative transform that visually reproduces the start framing,
//!   interpolated via transform only.
//!
//! # Invariants
//!
//! 1. The destination rectangle's aspect ratio is locked to 392:217.
//! 2. The destination is centered in the container and respects the
//!    per-mode margin fractions (8%/82% desktop, 5%/75% mobile).
//! 3. Screen-pixel measurements are normalized into container-local units by
//!    the container's visual scale factor; a degenerate factor defaults to 1.
//! 4. Exactly one variant is populated; switching [`ViewMode`] invalidates a
//!    held snapshot and requires re-resolution before the next anchor.
//!
//! # Failure Modes
//!
//! - Unmeasurable source or container (zero size, not yet mounted): returns
//!   `None`; the caller retains its previous snapshot. Never panics on a
//!   transient missing measurement.

use crate::geometry::{Rect, Transform2D, fit_aspect};
use crate::viewport::ViewMode;

/// Aspect ratio of the channel shape (392:217), matching the tile artwork.
pub const CHANNEL_ASPECT: f64 = 392.0 / 217.0;

/// The container's measured state: its visual (possibly scaled) screen rect
/// and its unscaled layout size.
///
/// The menu surface may sit inside a visually scaled wrapper, so screen
/// measurements must be divided back into layout units before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    /// Bounding rect in screen pixels (after any visual scaling).
    pub visual: Rect,
    /// Unscaled layout width.
    pub layout_width: f64,
    /// Unscaled layout height.
    pub layout_height: f64,
}

impl ContainerMetrics {
    /// An unscaled container: visual rect equals layout size at the origin.
    #[must_use]
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            visual: Rect::from_size(width, height),
            layout_width: width,
            layout_height: height,
        }
    }

    /// Per-axis visual scale factors, defaulting to 1 when degenerate.
    #[must_use]
    pub fn scale_factors(&self) -> (f64, f64) {
        let sx = self.visual.width / self.layout_width;
        let sy = self.visual.height / self.layout_height;
        (
            if sx.is_finite() && sx > 0.0 { sx } else { 1.0 },
            if sy.is_finite() && sy > 0.0 { sy } else { 1.0 },
        )
    }

    fn is_measurable(&self) -> bool {
        self.layout_width > 0.0 && self.layout_height > 0.0 && self.visual.is_measurable()
    }
}

/// Resolved positioning data for the morph animation, tagged by strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometrySnapshot {
    /// Desktop: interpolate layout rectangles from `start` to `end`.
    Layout { start: Rect, end: Rect },
    /// Mobile: element is laid out at `dest`; `initial` is the relative
    /// transform that visually reproduces the start framing.
    Transform { dest: Rect, initial: Transform2D },
}

impl GeometrySnapshot {
    /// The strategy this snapshot was resolved for.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Layout { .. } => ViewMode::Desktop,
            Self::Transform { .. } => ViewMode::Mobile,
        }
    }

    /// The destination rectangle (the open framing) for either variant.
    #[must_use]
    pub fn destination(&self) -> Rect {
        match self {
            Self::Layout { end, .. } => *end,
            Self::Transform { dest, .. } => *dest,
        }
    }
}

/// Resolve the animation geometry for a tile.
///
/// `source` is the tile's bounding rect in screen pixels; `container` the
/// surrounding surface; `viewport_width` selects the strategy. Returns `None`
/// when either measurement is unusable, in which case the caller keeps its
/// previous snapshot.
#[must_use]
pub fn resolve(
    source: Rect,
    container: &ContainerMetrics,
    viewport_width: f64,
) -> Option<GeometrySnapshot> {
    if !source.is_measurable() || !container.is_measurable() {
        #[cfg(feature = "tracing")]
        tracing::trace!(?source, "skipping resolution: unmeasurable anchor");
        return None;
    }

    let mode = ViewMode::from_width(viewport_width);
    let (scale_x, scale_y) = container.scale_factors();

    // Normalize the screen-pixel source rect into container-local units.
    let start = Rect {
        top: (source.top - container.visual.top) / scale_y,
        left: (source.left - container.visual.left) / scale_x,
        width: source.width / scale_x,
        height: source.height / scale_y,
    };

    // Aspect-locked destination, centered within the margin bounds.
    let margin_x = container.layout_width * mode.margin_x_fraction();
    let max_w = container.layout_width - margin_x * 2.0;
    let max_h = container.layout_height * mode.height_cap_fraction();
    let (target_w, target_h) = fit_aspect(max_w, max_h, CHANNEL_ASPECT);
    let end = Rect::centered_in(
        container.layout_width,
        container.layout_height,
        target_w,
        target_h,
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(%mode, ?start, ?end, "resolved morph geometry");

    Some(match mode {
        ViewMode::Desktop => GeometrySnapshot::Layout { start, end },
        ViewMode::Mobile => GeometrySnapshot::Transform {
            dest: end,
            initial: Transform2D::between(&end, &start),
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
