#![forbid(unsafe_code)]

//! The transition phase machine.
//!
//! [`TransitionMachine`] owns the `(active channel, geometry snapshot, phase)`
//! tuple as a single unit: every mutation happens inside one method call, so a
//! render step can never observe a partially applied update. [`AnimPhase`]
//! describes the transition itself; [`ViewState`] describes the destination
//! screen — the two are deliberately decoupled so the morph can be mid-flight
//! while the logical view has already switched.
//!
//! Forward: `Idle → Measuring → Expanding → Open`. Reverse walks back down.
//! `Detail ↔ App` is orthogonal and never re-runs the morph.
//!
//! # Invariants
//!
//! 1. Exactly one phase is current at any instant.
//! 2. The active channel is non-null throughout `Measuring..Open`.
//! 3. Snapshot and active channel are cleared together, only when the phase
//!    returns to `Idle`.
//! 4. Beginning a new forward or reverse sequence bumps the generation, so
//!    delayed steps of a superseded sequence are dropped by their callers.
//! 5. Step methods re-validate the phase they expect and return `false`
//!    instead of corrupting state when a stale callback reaches them anyway.

use homegrid_core::{ChannelId, GeometrySnapshot};

use crate::sequencer::Generation;

/// The transition sub-state, distinct from the logical screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimPhase {
    /// No transition; grid at rest.
    Idle,
    /// Snapshot resolved; waiting one frame for the start geometry to paint.
    Measuring,
    /// The morph is in flight.
    Expanding,
    /// The morph settled; the detail surface is interactive.
    Open,
}

/// The logical screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// The channel grid.
    Grid,
    /// The expanded channel detail surface.
    Detail,
    /// The full-screen app behind the blackout gate.
    App,
}

/// Owns phase, view, active channel, and snapshot as one atomic tuple.
#[derive(Debug, Clone)]
pub struct TransitionMachine {
    phase: AnimPhase,
    view: ViewState,
    active: Option<ChannelId>,
    snapshot: Option<GeometrySnapshot>,
    generation: Generation,
}

impl TransitionMachine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: AnimPhase::Idle,
            view: ViewState::Grid,
            active: None,
            snapshot: None,
            generation: Generation::ZERO,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.phase
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn active(&self) -> Option<&ChannelId> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.snapshot.as_ref()
    }

    /// The generation of the sequence currently in flight.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the morph is mid-flight (paint pending or animating).
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, AnimPhase::Measuring | AnimPhase::Expanding)
    }

    // -- forward sequence ---------------------------------------------------

    /// Start a forward sequence for `id` with a freshly resolved snapshot.
    ///
    /// Supersedes any sequence in flight: last write wins on the tuple, and
    /// the bumped generation strands the superseded sequence's timers.
    pub fn begin_expand(&mut self, id: ChannelId, snapshot: GeometrySnapshot) -> Generation {
        tracing::debug!(channel = %id, "begin expand");
        self.active = Some(id);
        self.snapshot = Some(snapshot);
        self.phase = AnimPhase::Measuring;
        self.generation.bump()
    }

    /// One frame after selection: the start geometry has painted; animate.
    pub fn advance_expand(&mut self) -> bool {
        if self.phase != AnimPhase::Measuring {
            return false;
        }
        self.phase = AnimPhase::Expanding;
        self.view = ViewState::Detail;
        true
    }

    /// The morph duration elapsed; the detail surface becomes interactive.
    pub fn finish_expand(&mut self) -> bool {
        if self.phase != AnimPhase::Expanding {
            return false;
        }
        self.phase = AnimPhase::Open;
        tracing::debug!("expand settled");
        true
    }

    // -- reverse sequence ---------------------------------------------------

    /// Start the collapse back to the grid.
    ///
    /// Returns the new generation when a snapshot exists and the collapse
    /// will animate. Without a snapshot there is nothing to morph; the
    /// machine resets to the grid immediately and returns `None`.
    pub fn begin_collapse(&mut self) -> Option<Generation> {
        if self.snapshot.is_some() {
            tracing::debug!("begin collapse");
            self.phase = AnimPhase::Expanding;
            Some(self.generation.bump())
        } else {
            self.reset_to_grid();
            None
        }
    }

    /// One frame into the collapse: the grid is the destination again.
    pub fn advance_collapse(&mut self) -> bool {
        if self.phase != AnimPhase::Expanding {
            return false;
        }
        self.phase = AnimPhase::Measuring;
        self.view = ViewState::Grid;
        true
    }

    /// The collapse duration elapsed; clear the tuple together.
    pub fn finish_collapse(&mut self) -> bool {
        if self.phase != AnimPhase::Measuring {
            return false;
        }
        self.phase = AnimPhase::Idle;
        self.active = None;
        self.snapshot = None;
        tracing::debug!("collapse settled");
        true
    }

    /// Hard reset to the grid with no animation.
    pub fn reset_to_grid(&mut self) {
        self.phase = AnimPhase::Idle;
        self.view = ViewState::Grid;
        self.active = None;
        self.snapshot = None;
        self.generation.bump();
    }

    // -- while expanded -----------------------------------------------------

    /// Switch the active channel in place (adjacent-tile navigation).
    ///
    /// The snapshot is refreshed separately once the new tile's position can
    /// be measured; until then the old geometry stays anchored.
    pub fn retarget(&mut self, id: ChannelId) -> bool {
        if self.active.is_none() {
            return false;
        }
        tracing::debug!(channel = %id, "retarget active channel");
        self.active = Some(id);
        true
    }

    /// Replace the snapshot after re-anchoring or a viewport mode change.
    ///
    /// Ignored when nothing is active; a stale re-anchor callback arriving
    /// after collapse must not resurrect geometry.
    pub fn refresh_snapshot(&mut self, snapshot: GeometrySnapshot) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    // -- app view (orthogonal) ----------------------------------------------

    /// Enter the full-screen app view. Requires an active detail surface.
    pub fn enter_app(&mut self) -> bool {
        if self.view != ViewState::Detail || self.active.is_none() {
            return false;
        }
        self.view = ViewState::App;
        true
    }

    /// Return from the app to the detail surface without re-running the morph.
    pub fn leave_app(&mut self) -> bool {
        if self.view != ViewState::App {
            return false;
        }
        self.view = ViewState::Detail;
        true
    }
}

impl Default for TransitionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegrid_core::Rect;

    fn snap() -> GeometrySnapshot {
        GeometrySnapshot::Layout {
            start: Rect::new(10.0, 10.0, 100.0, 60.0),
            end: Rect::new(100.0, 100.0, 800.0, 443.0),
        }
    }

    fn id(s: &str) -> ChannelId {
        ChannelId::new(s)
    }

    #[test]
    fn forward_sequence_visits_each_phase_once() {
        let mut m = TransitionMachine::new();
        assert_eq!(m.phase(), AnimPhase::Idle);

        m.begin_expand(id("about"), snap());
        assert_eq!(m.phase(), AnimPhase::Measuring);
        assert_eq!(m.view(), ViewState::Grid);
        assert!(m.active().is_some());

        assert!(m.advance_expand());
        assert_eq!(m.phase(), AnimPhase::Expanding);
        assert_eq!(m.view(), ViewState::Detail);

        assert!(m.finish_expand());
        assert_eq!(m.phase(), AnimPhase::Open);
        assert!(m.active().is_some());
    }

    #[test]
    fn stale_steps_do_not_apply() {
        let mut m = TransitionMachine::new();
        // No sequence started; step callbacks must be no-ops.
        assert!(!m.advance_expand());
        assert!(!m.finish_expand());
        assert!(!m.advance_collapse());
        assert!(!m.finish_collapse());
        assert_eq!(m.phase(), AnimPhase::Idle);
    }

    #[test]
    fn round_trip_clears_tuple_together() {
        let mut m = TransitionMachine::new();
        m.begin_expand(id("video"), snap());
        m.advance_expand();
        m.finish_expand();

        assert!(m.begin_collapse().is_some());
        assert_eq!(m.view(), ViewState::Detail);
        assert!(m.advance_collapse());
        assert_eq!(m.view(), ViewState::Grid);
        assert!(m.finish_collapse());

        assert_eq!(m.phase(), AnimPhase::Idle);
        assert!(m.active().is_none());
        assert!(m.snapshot().is_none());
    }

    #[test]
    fn collapse_without_snapshot_resets_immediately() {
        let mut m = TransitionMachine::new();
        assert!(m.begin_collapse().is_none());
        assert_eq!(m.phase(), AnimPhase::Idle);
        assert_eq!(m.view(), ViewState::Grid);
    }

    #[test]
    fn new_selection_supersedes_and_bumps_generation() {
        let mut m = TransitionMachine::new();
        let g1 = m.begin_expand(id("about"), snap());
        let g2 = m.begin_expand(id("video"), snap());
        assert!(g2 > g1);
        assert_eq!(m.active(), Some(&id("video")));
        assert_eq!(m.phase(), AnimPhase::Measuring);
    }

    #[test]
    fn retarget_keeps_phase_and_snapshot() {
        let mut m = TransitionMachine::new();
        m.begin_expand(id("about"), snap());
        m.advance_expand();
        m.finish_expand();
        assert!(m.retarget(id("video")));
        assert_eq!(m.phase(), AnimPhase::Open);
        assert!(m.snapshot().is_some());
    }

    #[test]
    fn retarget_without_active_is_noop() {
        let mut m = TransitionMachine::new();
        assert!(!m.retarget(id("video")));
        assert!(m.active().is_none());
    }

    #[test]
    fn refresh_snapshot_ignored_after_collapse() {
        let mut m = TransitionMachine::new();
        assert!(!m.refresh_snapshot(snap()));
        assert!(m.snapshot().is_none());
    }

    #[test]
    fn app_round_trip_preserves_open_phase() {
        let mut m = TransitionMachine::new();
        m.begin_expand(id("music"), snap());
        m.advance_expand();
        m.finish_expand();

        assert!(m.enter_app());
        assert_eq!(m.view(), ViewState::App);
        assert_eq!(m.phase(), AnimPhase::Open);

        assert!(m.leave_app());
        assert_eq!(m.view(), ViewState::Detail);
        assert_eq!(m.phase(), AnimPhase::Open);
    }

    #[test]
    fn enter_app_requires_detail_view() {
        let mut m = TransitionMachine::new();
        assert!(!m.enter_app());
        assert!(!m.leave_app());
    }
}
