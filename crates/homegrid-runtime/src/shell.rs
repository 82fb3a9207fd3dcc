#![forbid(unsafe_code)]

//! The coordinating shell: inputs in, timers through, state out.
//!
//! [`Shell`] owns the whole engine state — catalog, boot controller, mail
//! panel, transition machine, blackout flag, and the [`Sequencer`] — and is
//! the only place timer chains are scheduled and validated. Hosts feed it
//! [`Input`] events plus a `now` instant, call [`Shell::advance`] on every
//! tick, and read the state back each render.
//!
//! # Timer discipline
//!
//! Every delayed step is validated when it fires, not when it is scheduled:
//! morph, re-anchor, and mail steps compare their captured generation against
//! the live one; boot steps name the phase they expect; blackout steps check
//! the cover is still up. Rapid double-triggering therefore strands the
//! superseded chain instead of resurrecting stale phases.
//!
//! # Invariants
//!
//! 1. All engine input is ignored until the boot ladder completes (resize is
//!    an external signal and always applies).
//! 2. A fired step mutates state only after its validation passes; failures
//!    are absorbed silently per the error-handling contract.
//! 3. Anchor measurements that fail leave the previous snapshot in place.

use homegrid_core::{
    Catalog, Channel, ChannelId, ContainerMetrics, Direction, GeometrySnapshot, Rect, ViewMode,
    resolve,
};
use web_time::Instant;

use crate::boot::{BootController, BootPhase};
use crate::mail::MailPanel;
use crate::policy::EnginePolicy;
use crate::sequencer::{Fired, Generation, Sequencer};
use crate::transition::{AnimPhase, TransitionMachine, ViewState};

/// How the surrounding grid exposes element positions to the engine.
///
/// Measurements are in screen pixels of the (possibly visually scaled)
/// surface. Both queries may transiently fail while the layer is not mounted;
/// the engine skips the dependent work and retries on the next trigger.
pub trait AnchorQuery {
    /// The menu surface's current metrics.
    fn container(&self) -> Option<ContainerMetrics>;

    /// The on-screen rect of one channel's grid tile.
    fn tile_rect(&self, id: &ChannelId) -> Option<Rect>;
}

/// A user or host event delivered to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Any button during the boot notice.
    BootAcknowledge,
    /// A grid tile was selected.
    SelectChannel(ChannelId),
    /// Navigate to the adjacent channel while expanded.
    SwitchChannel(Direction),
    /// Back to the grid.
    Back,
    /// Launch the active channel's app behind the blackout gate.
    StartApp,
    /// Return from the app to the detail surface.
    LeaveApp,
    /// Slide the mail panel in.
    OpenMail,
    /// Slide the mail panel out.
    CloseMail,
    /// The viewport resized.
    Resize { width: f64 },
}

/// Delayed steps the sequencer delivers back to the shell.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    ExpandPaint,
    ExpandSettle,
    CollapsePaint,
    CollapseSettle,
    Reanchor(ChannelId),
    AppSwap,
    BlackoutClear,
    BootTextFaded,
    BootWaitElapsed,
    BootOverlayFaded,
    MailReveal,
    MailSettle,
    MailUnmount,
}

/// The engine coordinator. Generic over the host's anchor query.
#[derive(Debug)]
pub struct Shell<A> {
    catalog: Catalog,
    policy: EnginePolicy,
    anchors: A,
    viewport_width: f64,
    mode: ViewMode,
    boot: BootController,
    mail: MailPanel,
    machine: TransitionMachine,
    blackout: bool,
    sequencer: Sequencer<Step>,
}

impl<A: AnchorQuery> Shell<A> {
    /// Create a shell with the default policy.
    #[must_use]
    pub fn new(catalog: Catalog, anchors: A, viewport_width: f64) -> Self {
        Self::with_policy(catalog, anchors, viewport_width, EnginePolicy::default())
    }

    /// Create a shell with an explicit policy.
    #[must_use]
    pub fn with_policy(
        catalog: Catalog,
        anchors: A,
        viewport_width: f64,
        policy: EnginePolicy,
    ) -> Self {
        Self {
            catalog,
            policy,
            anchors,
            viewport_width,
            mode: ViewMode::from_width(viewport_width),
            boot: BootController::new(),
            mail: MailPanel::new(),
            machine: TransitionMachine::new(),
            blackout: false,
            sequencer: Sequencer::new(),
        }
    }

    // -- state accessors ----------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.machine.phase()
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.machine.view()
    }

    #[must_use]
    pub fn active_channel_id(&self) -> Option<&ChannelId> {
        self.machine.active()
    }

    /// The active channel's catalog entry, if any.
    #[must_use]
    pub fn active_channel(&self) -> Option<&Channel> {
        self.machine.active().and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.machine.snapshot()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.machine.is_transitioning()
    }

    #[must_use]
    pub fn blackout(&self) -> bool {
        self.blackout
    }

    #[must_use]
    pub fn boot_phase(&self) -> BootPhase {
        self.boot.phase()
    }

    #[must_use]
    pub fn mail(&self) -> &MailPanel {
        &self.mail
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    #[must_use]
    pub fn anchors(&self) -> &A {
        &self.anchors
    }

    pub fn anchors_mut(&mut self) -> &mut A {
        &mut self.anchors
    }

    /// Deadline of the soonest pending timer, for host wakeup scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_due()
    }

    // -- input --------------------------------------------------------------

    /// Deliver one input event at `now`.
    pub fn handle(&mut self, input: Input, now: Instant) {
        if !self.boot.is_complete() {
            match input {
                Input::BootAcknowledge => self.boot_acknowledge(now),
                // Viewport signals are ambient, not user interaction.
                Input::Resize { width } => self.apply_resize(width),
                other => {
                    tracing::trace!(?other, "input blocked until boot completes");
                }
            }
            return;
        }

        match input {
            Input::BootAcknowledge => {}
            Input::SelectChannel(id) => self.select_channel(id, now),
            Input::SwitchChannel(direction) => self.switch_channel(direction, now),
            Input::Back => self.back(now),
            Input::StartApp => self.start_app(now),
            Input::LeaveApp => {
                self.machine.leave_app();
            }
            Input::OpenMail => self.open_mail(now),
            Input::CloseMail => self.close_mail(now),
            Input::Resize { width } => self.apply_resize(width),
        }
    }

    /// Drain and apply every timer due at or before `now`.
    pub fn advance(&mut self, now: Instant) {
        for fired in self.sequencer.poll(now) {
            self.apply(fired, now);
        }
    }

    // -- input handlers -----------------------------------------------------

    fn boot_acknowledge(&mut self, now: Instant) {
        if self.boot.acknowledge() {
            let timing = &self.policy.timing;
            self.sequencer.schedule(
                now,
                timing.boot_text_fade(),
                Generation::ZERO,
                Step::BootTextFaded,
            );
        }
    }

    fn select_channel(&mut self, id: ChannelId, now: Instant) {
        if self.machine.view() == ViewState::App {
            return;
        }
        if self.catalog.get(&id).is_none() {
            tracing::debug!(channel = %id, "selection of unknown channel ignored");
            return;
        }
        let Some(snapshot) = self.measure(&id) else {
            // Anchor not measurable yet; skip, keep current state.
            return;
        };
        let generation = self.machine.begin_expand(id, snapshot);
        let timing = &self.policy.timing;
        self.sequencer
            .schedule(now, timing.frame(), generation, Step::ExpandPaint);
        self.sequencer
            .schedule(now, timing.morph(), generation, Step::ExpandSettle);
    }

    fn switch_channel(&mut self, direction: Direction, now: Instant) {
        if self.machine.view() == ViewState::App {
            return;
        }
        let Some(active) = self.machine.active() else {
            return;
        };
        let Some(next) = self.catalog.neighbor(active, direction) else {
            // Unknown id or empty catalog: keep the current channel active.
            return;
        };
        let next_id = next.id().clone();
        self.machine.retarget(next_id.clone());
        // Measure only after the host re-renders the new tile; one tick later.
        self.sequencer
            .schedule_next_tick(now, self.machine.generation(), Step::Reanchor(next_id));
    }

    fn back(&mut self, now: Instant) {
        if self.machine.view() == ViewState::App {
            // The app shell's own back control; no morph involved.
            self.machine.leave_app();
            return;
        }
        let Some(generation) = self.machine.begin_collapse() else {
            return;
        };
        let timing = &self.policy.timing;
        self.sequencer
            .schedule(now, timing.frame(), generation, Step::CollapsePaint);
        self.sequencer
            .schedule(now, timing.morph(), generation, Step::CollapseSettle);
    }

    fn start_app(&mut self, now: Instant) {
        if self.blackout
            || self.machine.view() != ViewState::Detail
            || self.machine.active().is_none()
        {
            return;
        }
        self.blackout = true;
        tracing::debug!("blackout: covering for app swap");
        self.sequencer.schedule(
            now,
            self.policy.timing.blackout_cover(),
            self.machine.generation(),
            Step::AppSwap,
        );
    }

    fn open_mail(&mut self, now: Instant) {
        let Some(generation) = self.mail.open() else {
            return;
        };
        // Two frames: let the closed framing paint before sliding in.
        let reveal_delay = self.policy.timing.frame() * 2;
        self.sequencer
            .schedule(now, reveal_delay, generation, Step::MailReveal);
    }

    fn close_mail(&mut self, now: Instant) {
        let Some(generation) = self.mail.close() else {
            return;
        };
        self.sequencer.schedule(
            now,
            self.policy.timing.mail_close(),
            generation,
            Step::MailUnmount,
        );
    }

    fn apply_resize(&mut self, width: f64) {
        self.viewport_width = width;
        let mode = ViewMode::from_width(width);
        if mode == self.mode {
            return;
        }
        tracing::debug!(%mode, "viewport mode changed");
        self.mode = mode;
        // A held snapshot was computed for the other strategy; re-derive it
        // before the next render. A failed measurement retains the old one.
        if self.machine.snapshot().is_some() {
            if let Some(active) = self.machine.active().cloned() {
                if let Some(snapshot) = self.measure(&active) {
                    self.machine.refresh_snapshot(snapshot);
                }
            }
        }
    }

    // -- fired steps ----------------------------------------------------------

    fn apply(&mut self, fired: Fired<Step>, now: Instant) {
        let live = self.machine.generation();
        match fired.msg {
            Step::ExpandPaint => {
                if fired.generation == live {
                    self.machine.advance_expand();
                } else {
                    tracing::trace!(%fired.generation, %live, "stale expand paint dropped");
                }
            }
            Step::ExpandSettle => {
                if fired.generation == live {
                    self.machine.finish_expand();
                }
            }
            Step::CollapsePaint => {
                if fired.generation == live {
                    self.machine.advance_collapse();
                }
            }
            Step::CollapseSettle => {
                if fired.generation == live {
                    self.machine.finish_collapse();
                }
            }
            Step::Reanchor(id) => {
                if fired.generation == live && self.machine.active() == Some(&id) {
                    if let Some(snapshot) = self.measure(&id) {
                        self.machine.refresh_snapshot(snapshot);
                    }
                }
            }
            Step::AppSwap => {
                if fired.generation == live && self.blackout {
                    if self.machine.enter_app() {
                        self.sequencer.schedule(
                            now,
                            self.policy.timing.blackout_reveal(),
                            self.machine.generation(),
                            Step::BlackoutClear,
                        );
                    } else {
                        // Nothing to swap to; never leave the cover up.
                        self.blackout = false;
                    }
                } else if fired.generation != live && self.blackout {
                    self.blackout = false;
                }
            }
            // Clearing the cover is always safe; only the state check applies.
            Step::BlackoutClear => {
                self.blackout = false;
            }
            Step::BootTextFaded => {
                if self.boot.advance_from(BootPhase::FadingText) {
                    self.sequencer.schedule(
                        now,
                        self.policy.timing.boot_wait(),
                        Generation::ZERO,
                        Step::BootWaitElapsed,
                    );
                }
            }
            Step::BootWaitElapsed => {
                if self.boot.advance_from(BootPhase::Waiting) {
                    self.sequencer.schedule(
                        now,
                        self.policy.timing.boot_overlay_fade(),
                        Generation::ZERO,
                        Step::BootOverlayFaded,
                    );
                }
            }
            Step::BootOverlayFaded => {
                self.boot.advance_from(BootPhase::FadingOverlay);
            }
            Step::MailReveal => {
                if fired.generation == self.mail.generation() && self.mail.reveal() {
                    self.sequencer.schedule(
                        now,
                        self.policy.timing.mail_settle(),
                        self.mail.generation(),
                        Step::MailSettle,
                    );
                }
            }
            Step::MailSettle => {
                if fired.generation == self.mail.generation() {
                    self.mail.settle();
                }
            }
            Step::MailUnmount => {
                if fired.generation == self.mail.generation() {
                    self.mail.unmount();
                } else {
                    tracing::trace!("stale mail unmount dropped");
                }
            }
        }
    }

    fn measure(&self, id: &ChannelId) -> Option<GeometrySnapshot> {
        let container = self.anchors.container()?;
        let tile = self.anchors.tile_rect(id)?;
        resolve(tile, &container, self.viewport_width)
    }
}
