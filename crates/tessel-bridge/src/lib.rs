//! Tessel bridge crate.
//!
//! Translates the per-frame draw output of the immediate-mode UI toolkit
//! (`ui`) into triangle batches for a host engine's immediate mesh builder
//! (`host`), and keeps the toolkit's font atlas resident on the host.
//!
//! The public surface of the bridge lives in [`bridge`]; [`OverlayRenderer`]
//! bundles it for applications.

pub mod bridge;
pub mod coords;
pub mod feature;
pub mod host;
pub mod logging;
pub mod paint;
pub mod ui;

pub use bridge::{OverlayConfig, OverlayRenderer};
