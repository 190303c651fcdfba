//! wgpu device and surface ownership.
//!
//! One [`Gpu`] exists per window. It owns the adapter, device and queue,
//! keeps the swapchain configured across resizes, and hands out one
//! [`GpuFrame`] per redraw.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
