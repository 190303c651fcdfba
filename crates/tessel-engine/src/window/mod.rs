//! Window runtime.
//!
//! Owns the `winit` event loop and, per window, the window, its [`Gpu`](crate::device::Gpu)
//! and its [`WgpuHost`](crate::host::WgpuHost).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
