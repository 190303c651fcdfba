//! Tessel engine crate.
//!
//! A wgpu host for the tessel bridge: a `winit` window runtime, per-window
//! GPU contexts, and [`WgpuHost`](host::WgpuHost), which implements the
//! bridge's host interfaces and draws the submitted UI batches.

pub mod core;
pub mod device;
pub mod host;
pub mod render;
pub mod window;
