#![forbid(unsafe_code)]

//! homegrid public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! A host embeds the engine by implementing [`AnchorQuery`] over its layout
//! tree, feeding [`Input`] events and ticks into a [`Shell`], and rendering
//! a [`Scene`] each frame:
//!
//! ```ignore
//! use homegrid::prelude::*;
//!
//! let mut shell = Shell::new(Catalog::default_lineup(), anchors, 1280.0);
//! shell.handle(Input::BootAcknowledge, now);
//! loop {
//!     shell.advance(now);
//!     let scene = Scene::build(&shell);
//!     // position layers per `scene`, sleep until shell.next_deadline()
//! }
//! ```

// --- Core re-exports -------------------------------------------------------

pub use homegrid_core::{
    CHANNEL_ASPECT, Catalog, Channel, ChannelId, ContainerMetrics, DESKTOP_BREAKPOINT, Direction,
    GeometrySnapshot, Rect, Transform2D, ViewMode, fit_aspect, resolve,
};

// --- Runtime re-exports ----------------------------------------------------

pub use homegrid_runtime::{
    AnchorQuery, AnimPhase, BootController, BootPhase, EnginePolicy, Generation, Input, MailPanel,
    PolicyError, Sequencer, Shell, TimingPolicy, TransitionMachine, ViewState,
};

// --- Compose re-exports ----------------------------------------------------

pub use homegrid_compose::{
    BootOverlay, ContentLayout, MailLayer, MorphLayer, MorphPlacement, Scene,
};

/// Lightweight prelude for day-to-day usage.
pub mod prelude {
    pub use homegrid_compose::{ContentLayout, MorphPlacement, Scene};
    pub use homegrid_core::{
        Catalog, Channel, ChannelId, ContainerMetrics, Direction, GeometrySnapshot, Rect,
        Transform2D, ViewMode,
    };
    pub use homegrid_runtime::{
        AnchorQuery, AnimPhase, BootPhase, EnginePolicy, Input, Shell, ViewState,
    };
}
