//! Contracts between the window runtime and applications.
//!
//! Applications implement [`App`]; the runtime calls it with a [`FrameCtx`]
//! per redraw that exposes the window, its GPU context and its [`WgpuHost`](crate::host::WgpuHost).

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
