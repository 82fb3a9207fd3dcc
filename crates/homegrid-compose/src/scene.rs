#![forbid(unsafe_code)]

//! Scene composition: fold engine state into one per-frame description.
//!
//! [`Scene::build`] reads the shell once per render tick and produces the
//! full layer stack: boot overlay, blackout, grid, detail backdrop, the
//! morphing element, the mail panel, and the app shell. The morph placement
//! matches exhaustively on the [`GeometrySnapshot`] variant, so the desktop
//! and mobile strategies can never be mixed within a frame.
//!
//! # Invariants
//!
//! 1. The morph layer exists only while a channel is active with a resolved
//!    snapshot and the phase is not `Idle`.
//! 2. Exactly one placement variant is produced per frame, chosen by the
//!    snapshot's own tag — never by re-deriving the viewport mode.
//! 3. Layer opacities are pure functions of engine state; building a scene
//!    never mutates the shell.

use homegrid_core::{GeometrySnapshot, Rect, Transform2D};
use homegrid_runtime::{AnchorQuery, AnimPhase, BootPhase, Shell, ViewState};

use crate::content::ContentLayout;

/// Boot overlay presentation while the ladder is incomplete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootOverlay {
    pub phase: BootPhase,
    /// Whole-overlay opacity; drops to 0 during the final fade.
    pub overlay_opacity: f64,
    /// Disclaimer text opacity; drops to 0 as soon as input is accepted.
    pub text_opacity: f64,
}

/// Placement of the morphing element, tagged by animation strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphPlacement {
    /// Desktop: the element's current layout rectangle.
    Layout(Rect),
    /// Mobile: the element stays laid out at `dest`; `transform` carries the
    /// current relative offset (the initial offset or identity).
    Transform { dest: Rect, transform: Transform2D },
}

/// The morphing element's full per-frame description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphLayer {
    pub placement: MorphPlacement,
    /// Whether the host should run its easing transition on the placement.
    pub animating: bool,
    /// Pointer events are only enabled once the morph has settled.
    pub interactive: bool,
    /// The two-state contract handed to the content renderer.
    pub content: ContentLayout,
}

/// Mail panel layer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailLayer {
    /// Slid in (true) or at its off-screen position (false).
    pub visible: bool,
    /// The slide settled; content may take focus.
    pub settled: bool,
}

/// One frame's complete layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Present until the boot ladder completes.
    pub boot: Option<BootOverlay>,
    /// Full-screen black cover for the app swap.
    pub blackout_opacity: f64,
    /// Channel grid opacity; the grid is interactive at full opacity only.
    pub grid_opacity: f64,
    /// Black backdrop behind the detail surface.
    pub detail_backdrop_opacity: f64,
    /// The morphing element, while one is in flight or open.
    pub morph: Option<MorphLayer>,
    /// The mail panel, while mounted.
    pub mail: Option<MailLayer>,
    /// Whether the full-screen app shell is front-most.
    pub app_shell_visible: bool,
}

impl Scene {
    /// Compose the scene for the shell's current state.
    #[must_use]
    pub fn build<A: AnchorQuery>(shell: &Shell<A>) -> Self {
        let phase = shell.phase();
        let view = shell.view();
        let transitioning = shell.is_transitioning();

        let boot = match shell.boot_phase() {
            BootPhase::Complete => None,
            boot_phase => Some(BootOverlay {
                phase: boot_phase,
                overlay_opacity: if boot_phase == BootPhase::FadingOverlay {
                    0.0
                } else {
                    1.0
                },
                text_opacity: if boot_phase == BootPhase::Notice {
                    1.0
                } else {
                    0.0
                },
            }),
        };

        let morph = match (phase, shell.snapshot(), shell.active_channel_id()) {
            (AnimPhase::Idle, _, _) | (_, None, _) | (_, _, None) => None,
            (phase, Some(snapshot), Some(_)) => Some(MorphLayer {
                placement: placement_for(snapshot, phase),
                animating: transitioning,
                interactive: phase == AnimPhase::Open,
                content: ContentLayout::from_phase(phase),
            }),
        };

        let mail = shell.mail().is_mounted().then(|| MailLayer {
            visible: shell.mail().is_visible(),
            settled: shell.mail().is_settled(),
        });

        Self {
            boot,
            blackout_opacity: if shell.blackout() { 1.0 } else { 0.0 },
            grid_opacity: if view == ViewState::Grid && !transitioning {
                1.0
            } else {
                0.0
            },
            detail_backdrop_opacity: if view == ViewState::Detail || transitioning {
                1.0
            } else {
                0.0
            },
            morph,
            mail,
            app_shell_visible: view == ViewState::App && shell.active_channel_id().is_some(),
        }
    }

    /// Whether the grid should accept pointer input this frame.
    #[must_use]
    pub fn grid_interactive(&self) -> bool {
        self.grid_opacity >= 1.0 && self.boot.is_none() && self.blackout_opacity == 0.0
    }
}

/// The morph's placement for a phase, per the snapshot's strategy.
///
/// `Measuring` paints the start framing (tile position); every later phase
/// paints the destination. Desktop moves the layout rect; mobile keeps the
/// rect fixed at the destination and relaxes the transform to identity.
fn placement_for(snapshot: &GeometrySnapshot, phase: AnimPhase) -> MorphPlacement {
    let at_start = matches!(phase, AnimPhase::Measuring | AnimPhase::Idle);
    match *snapshot {
        GeometrySnapshot::Layout { start, end } => {
            MorphPlacement::Layout(if at_start { start } else { end })
        }
        GeometrySnapshot::Transform { dest, initial } => MorphPlacement::Transform {
            dest,
            transform: if at_start {
                initial
            } else {
                Transform2D::IDENTITY
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegrid_core::{Catalog, ChannelId, ContainerMetrics, Rect};
    use homegrid_runtime::{Input, Shell};
    use web_time::{Duration, Instant};

    /// Fixed-position grid: every tile measures at the same rect.
    struct FixedGrid;

    impl AnchorQuery for FixedGrid {
        fn container(&self) -> Option<ContainerMetrics> {
            Some(ContainerMetrics::unscaled(1200.0, 800.0))
        }

        fn tile_rect(&self, _id: &ChannelId) -> Option<Rect> {
            Some(Rect::new(100.0, 50.0, 300.0, 166.0))
        }
    }

    fn booted_shell(width: f64) -> (Shell<FixedGrid>, Instant) {
        let mut shell = Shell::new(Catalog::default_lineup(), FixedGrid, width);
        let now = Instant::now();
        shell.handle(Input::BootAcknowledge, now);
        shell.advance(now + Duration::from_millis(1000)); // text faded
        shell.advance(now + Duration::from_millis(1200)); // wait elapsed
        let done = now + Duration::from_millis(2700); // overlay faded
        shell.advance(done);
        (shell, done)
    }

    #[test]
    fn idle_scene_shows_grid_only() {
        let (shell, _) = booted_shell(1280.0);
        let scene = Scene::build(&shell);
        assert!(scene.boot.is_none());
        assert_eq!(scene.grid_opacity, 1.0);
        assert_eq!(scene.detail_backdrop_opacity, 0.0);
        assert!(scene.morph.is_none());
        assert!(scene.grid_interactive());
    }

    #[test]
    fn boot_overlay_fades_per_phase() {
        let shell = Shell::new(Catalog::default_lineup(), FixedGrid, 1280.0);
        let scene = Scene::build(&shell);
        let boot = scene.boot.unwrap();
        assert_eq!(boot.phase, BootPhase::Notice);
        assert_eq!(boot.overlay_opacity, 1.0);
        assert_eq!(boot.text_opacity, 1.0);
        assert!(!scene.grid_interactive());
    }

    #[test]
    fn measuring_frame_paints_start_rect() {
        let (mut shell, now) = booted_shell(1280.0);
        shell.handle(Input::SelectChannel(ChannelId::new("about")), now);
        let scene = Scene::build(&shell);
        let morph = scene.morph.unwrap();
        assert!(morph.animating);
        assert!(!morph.interactive);
        assert_eq!(morph.content, ContentLayout::Compact);
        let MorphPlacement::Layout(rect) = morph.placement else {
            panic!("desktop placement expected");
        };
        assert_eq!(rect, Rect::new(100.0, 50.0, 300.0, 166.0));
        // Grid hides as soon as the morph is in flight.
        assert_eq!(scene.grid_opacity, 0.0);
        assert_eq!(scene.detail_backdrop_opacity, 1.0);
    }

    #[test]
    fn open_frame_paints_destination_and_is_interactive() {
        let (mut shell, now) = booted_shell(1280.0);
        shell.handle(Input::SelectChannel(ChannelId::new("about")), now);
        shell.advance(now + Duration::from_millis(16));
        shell.advance(now + Duration::from_millis(600));
        let scene = Scene::build(&shell);
        let morph = scene.morph.unwrap();
        assert!(!morph.animating);
        assert!(morph.interactive);
        assert_eq!(morph.content, ContentLayout::Full);
        let MorphPlacement::Layout(rect) = morph.placement else {
            panic!("desktop placement expected");
        };
        let (cx, cy) = rect.center();
        assert!((cx - 600.0).abs() < 1e-6);
        assert!((cy - 400.0).abs() < 1e-6);
    }

    #[test]
    fn mobile_scene_relaxes_transform_to_identity() {
        let (mut shell, now) = booted_shell(800.0);
        shell.handle(Input::SelectChannel(ChannelId::new("music")), now);
        let scene = Scene::build(&shell);
        let MorphPlacement::Transform { transform, .. } = scene.morph.unwrap().placement else {
            panic!("mobile placement expected");
        };
        assert!(!transform.is_identity());

        shell.advance(now + Duration::from_millis(16));
        let scene = Scene::build(&shell);
        let MorphPlacement::Transform { transform, dest } = scene.morph.unwrap().placement else {
            panic!("mobile placement expected");
        };
        assert!(transform.is_identity());
        assert!(dest.is_measurable());
    }

    #[test]
    fn blackout_and_app_shell() {
        let (mut shell, now) = booted_shell(1280.0);
        shell.handle(Input::SelectChannel(ChannelId::new("video")), now);
        shell.advance(now + Duration::from_millis(16));
        shell.advance(now + Duration::from_millis(600));
        shell.handle(Input::StartApp, now + Duration::from_millis(700));
        let scene = Scene::build(&shell);
        assert_eq!(scene.blackout_opacity, 1.0);
        assert!(!scene.app_shell_visible);

        shell.advance(now + Duration::from_millis(1700));
        let scene = Scene::build(&shell);
        assert!(scene.app_shell_visible);

        shell.advance(now + Duration::from_millis(2000));
        let scene = Scene::build(&shell);
        assert_eq!(scene.blackout_opacity, 0.0);
    }

    #[test]
    fn mail_layer_tracks_panel_state() {
        let (mut shell, now) = booted_shell(1280.0);
        shell.handle(Input::OpenMail, now);
        let scene = Scene::build(&shell);
        let mail = scene.mail.unwrap();
        assert!(!mail.visible);

        shell.advance(now + Duration::from_millis(32));
        let scene = Scene::build(&shell);
        assert!(scene.mail.unwrap().visible);

        shell.handle(Input::CloseMail, now + Duration::from_millis(100));
        shell.advance(now + Duration::from_millis(600));
        assert!(Scene::build(&shell).mail.is_none());
    }
}
