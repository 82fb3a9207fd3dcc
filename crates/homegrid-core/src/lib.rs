#![forbid(unsafe_code)]

//! Core: geometry, catalog, and viewport primitives for the homegrid engine.
//!
//! # Role in homegrid
//! `homegrid-core` is the pure layer. It owns the rectangle/transform math,
//! the immutable channel catalog, the viewport breakpoint, and the geometry
//! resolver that turns a measured tile rect into an animation snapshot.
//! Nothing here holds runtime state or schedules work.
//!
//! # Primary responsibilities
//! - **Rect / Transform2D**: container-local pixel geometry.
//! - **Catalog**: the ordered, immutable set of selectable channels with
//!   wraparound navigation.
//! - **ViewMode**: desktop vs. mobile animation strategy from viewport width.
//! - **resolve**: source rect + container + viewport width →
//!   [`GeometrySnapshot`], tagged by strategy.
//!
//! # How it fits in the system
//! The runtime (`homegrid-runtime`) calls [`resolve`] on selection,
//! re-anchoring, and mode changes, and owns the snapshot's lifecycle. The
//! compositor (`homegrid-compose`) matches exhaustively on the snapshot
//! variant to place the morphing element each frame.

pub mod catalog;
pub mod geometry;
pub mod resolve;
pub mod viewport;

pub use catalog::{Catalog, Channel, ChannelId, Direction};
pub use geometry::{Rect, Transform2D, fit_aspect};
pub use resolve::{CHANNEL_ASPECT, ContainerMetrics, GeometrySnapshot, resolve};
pub use viewport::{DESKTOP_BREAKPOINT, ViewMode};
