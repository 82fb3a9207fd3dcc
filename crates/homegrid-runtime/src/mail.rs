#![forbid(unsafe_code)]

//! Mail panel controller.
//!
//! The sliding mail panel uses a two-flag model: `mounted` controls whether
//! the panel exists in the layer tree at all, `visible` drives the slide
//! transition. Opening mounts the panel hidden and reveals it two frames
//! later, so the closed framing paints before the transition starts; closing
//! hides it immediately and unmounts only after the slide finishes. A
//! `settled` flag arms shortly after reveal — the content's cue to grab focus
//! without fighting the animation.
//!
//! Every chain carries the panel's own [`Generation`]; reopening during the
//! close window strands the pending unmount instead of tearing down a panel
//! the user just brought back.

use crate::sequencer::Generation;

/// Owns the mail panel's mount/visibility state and chain generation.
#[derive(Debug, Clone, Default)]
pub struct MailPanel {
    mounted: bool,
    visible: bool,
    settled: bool,
    generation: Generation,
}

impl MailPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel exists in the layer tree.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the panel is in its slid-in (visible) position.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the slide-in settled and content may take focus.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Begin opening: mount hidden, start a new chain.
    ///
    /// Returns the chain generation to schedule the reveal under, or `None`
    /// when the panel is already visible (open is then a no-op).
    pub fn open(&mut self) -> Option<Generation> {
        if self.visible {
            return None;
        }
        self.mounted = true;
        self.settled = false;
        tracing::debug!("mail panel opening");
        Some(self.generation.bump())
    }

    /// The closed framing has painted; slide in.
    pub fn reveal(&mut self) -> bool {
        if !self.mounted || self.visible {
            return false;
        }
        self.visible = true;
        true
    }

    /// The slide-in finished; content may focus.
    pub fn settle(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.settled = true;
        true
    }

    /// Begin closing: hide immediately, start a new chain for the unmount.
    ///
    /// `None` when the panel is not mounted.
    pub fn close(&mut self) -> Option<Generation> {
        if !self.mounted {
            return None;
        }
        self.visible = false;
        self.settled = false;
        tracing::debug!("mail panel closing");
        Some(self.generation.bump())
    }

    /// The slide-out finished; drop the panel from the layer tree.
    pub fn unmount(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.mounted = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_mounts_hidden() {
        let mut mail = MailPanel::new();
        assert!(mail.open().is_some());
        assert!(mail.is_mounted());
        assert!(!mail.is_visible());
    }

    #[test]
    fn reveal_then_settle() {
        let mut mail = MailPanel::new();
        mail.open();
        assert!(mail.reveal());
        assert!(mail.is_visible());
        assert!(!mail.is_settled());
        assert!(mail.settle());
        assert!(mail.is_settled());
    }

    #[test]
    fn open_while_visible_is_noop() {
        let mut mail = MailPanel::new();
        mail.open();
        mail.reveal();
        assert!(mail.open().is_none());
    }

    #[test]
    fn close_hides_immediately_and_unmounts_later() {
        let mut mail = MailPanel::new();
        mail.open();
        mail.reveal();
        assert!(mail.close().is_some());
        assert!(!mail.is_visible());
        assert!(mail.is_mounted());
        assert!(mail.unmount());
        assert!(!mail.is_mounted());
    }

    #[test]
    fn close_unmounted_is_noop() {
        let mut mail = MailPanel::new();
        assert!(mail.close().is_none());
    }

    #[test]
    fn reopen_bumps_generation_past_pending_unmount() {
        let mut mail = MailPanel::new();
        mail.open();
        mail.reveal();
        let close_gen = mail.close().unwrap();
        let reopen_gen = mail.open().unwrap();
        assert!(reopen_gen > close_gen);
        // The stale unmount's generation no longer matches; the shell drops
        // it and the remounted panel survives.
        assert!(mail.is_mounted());
    }

    #[test]
    fn unmount_refused_while_visible() {
        let mut mail = MailPanel::new();
        mail.open();
        mail.reveal();
        assert!(!mail.unmount());
        assert!(mail.is_mounted());
    }

    #[test]
    fn settle_requires_visibility() {
        let mut mail = MailPanel::new();
        mail.open();
        assert!(!mail.settle());
    }
}
