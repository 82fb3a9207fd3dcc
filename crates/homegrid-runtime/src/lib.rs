#![forbid(unsafe_code)]

//! Runtime: timer sequencing, transition phases, and the coordinating shell.
//!
//! # Role in homegrid
//! `homegrid-runtime` is the stateful layer. It owns the single
//! `(active channel, snapshot, phase)` tuple, the boot and mail controllers,
//! and the deadline queue that drives every chained phase transition. The
//! execution model is the browser host's: cooperative, single-threaded,
//! event-driven — no threads are spawned and nothing blocks.
//!
//! # Primary responsibilities
//! - **Sequencer**: deadline-ordered timers tagged with generation tokens;
//!   superseded chains are stranded instead of cancelled.
//! - **TransitionMachine**: `Idle → Measuring → Expanding → Open` and back,
//!   with the orthogonal `Grid / Detail / App` view state.
//! - **BootController / MailPanel**: the boot ladder and the sliding mail
//!   panel, each with an explicit owned lifecycle.
//! - **Shell**: the coordinator hosts feed inputs and ticks into.
//! - **EnginePolicy**: every timer duration as loadable policy data.
//!
//! # How it fits in the system
//! `homegrid-core` supplies the pure geometry; `homegrid-compose` folds the
//! shell's state into a per-frame scene description.

pub mod boot;
pub mod mail;
pub mod policy;
pub mod sequencer;
pub mod shell;
pub mod transition;

pub use boot::{BootController, BootPhase};
pub use mail::MailPanel;
pub use policy::{EnginePolicy, PolicyError, TimingPolicy};
pub use sequencer::{Fired, Generation, Sequencer};
pub use shell::{AnchorQuery, Input, Shell};
pub use transition::{AnimPhase, TransitionMachine, ViewState};
