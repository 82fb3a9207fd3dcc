#![forbid(unsafe_code)]

//! The render contract exposed to detail-view content.
//!
//! Content renderers never see raw geometry. They receive the transition
//! phase classified into exactly two presentation states and adapt their
//! icon/text layout accordingly.

use homegrid_runtime::AnimPhase;

/// Presentation state handed to the detail-view content renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentLayout {
    /// Collapsed-to-grid framing: the morph is anchored at the tile.
    Compact,
    /// Open framing: full detail layout.
    Full,
}

impl ContentLayout {
    /// Classify a transition phase into the two-state contract.
    ///
    /// The morph is framed at the tile only while `Measuring` (and while
    /// idle, when no content is mounted at all); from the first animated
    /// frame onwards the content lays out for the open framing so text and
    /// icons land where the morph is headed.
    #[must_use]
    pub fn from_phase(phase: AnimPhase) -> Self {
        match phase {
            AnimPhase::Idle | AnimPhase::Measuring => Self::Compact,
            AnimPhase::Expanding | AnimPhase::Open => Self::Full,
        }
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_while_anchored_at_tile() {
        assert_eq!(
            ContentLayout::from_phase(AnimPhase::Measuring),
            ContentLayout::Compact
        );
        assert_eq!(
            ContentLayout::from_phase(AnimPhase::Idle),
            ContentLayout::Compact
        );
    }

    #[test]
    fn full_from_first_animated_frame() {
        assert_eq!(
            ContentLayout::from_phase(AnimPhase::Expanding),
            ContentLayout::Full
        );
        assert!(ContentLayout::from_phase(AnimPhase::Open).is_full());
    }
}
