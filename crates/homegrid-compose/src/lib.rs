#![forbid(unsafe_code)]

//! Compose: per-frame scene description for the homegrid menu engine.
//!
//! # Role in homegrid
//! `homegrid-compose` is the read-only view layer. Each render tick it folds
//! the shell's state into a [`Scene`]: layer opacities, the morphing
//! element's placement (layout rect on desktop, destination + transform on
//! mobile), and the two-state content contract. It holds no state of its own
//! and never mutates the engine.

pub mod content;
pub mod scene;

pub use content::ContentLayout;
pub use scene::{BootOverlay, MailLayer, MorphLayer, MorphPlacement, Scene};
