#![forbid(unsafe_code)]

//! Boot sequence controller.
//!
//! A strictly monotonic phase ladder gating first interaction:
//! `Notice → FadingText → Waiting → FadingOverlay → Complete`. Input only has
//! an effect at `Notice`; once `Complete`, the controller is inert for the
//! rest of the session. The shell owns the timers between rungs; each delayed
//! step names the phase it expects, so a stray callback can never move the
//! ladder backwards or skip a rung.

/// Boot phase, monotonic and terminal at [`BootPhase::Complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootPhase {
    /// Disclaimer shown; waiting for any input.
    Notice,
    /// Disclaimer text fading out.
    FadingText,
    /// Black hold between text fade and overlay fade.
    Waiting,
    /// Overlay fading to reveal the menu.
    FadingOverlay,
    /// Boot finished; input unblocked.
    Complete,
}

impl BootPhase {
    /// The next rung of the ladder; `None` at the terminal phase.
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Notice => Some(Self::FadingText),
            Self::FadingText => Some(Self::Waiting),
            Self::Waiting => Some(Self::FadingOverlay),
            Self::FadingOverlay => Some(Self::Complete),
            Self::Complete => None,
        }
    }
}

/// Owns the boot phase with a defined lifecycle: initialized once at
/// `Notice`, driven forward only, inert after `Complete`.
#[derive(Debug, Clone)]
pub struct BootController {
    phase: BootPhase,
}

impl BootController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: BootPhase::Notice,
        }
    }

    #[must_use]
    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == BootPhase::Complete
    }

    /// Handle user input. Only effective at `Notice`; returns whether the
    /// ladder started moving (retriggering mid-fade is rejected).
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != BootPhase::Notice {
            return false;
        }
        self.phase = BootPhase::FadingText;
        tracing::debug!("boot acknowledged");
        true
    }

    /// Advance to the successor of `expected`, but only if `expected` is
    /// still the current phase. Stale timer callbacks fail the check and are
    /// absorbed.
    pub fn advance_from(&mut self, expected: BootPhase) -> bool {
        if self.phase != expected {
            return false;
        }
        match expected.successor() {
            Some(next) => {
                self.phase = next;
                tracing::debug!(?next, "boot advanced");
                true
            }
            None => false,
        }
    }
}

impl Default for BootController {
    fn default() -> Self {
        Self::new()
    }
}
