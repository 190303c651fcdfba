//! GPU side of the host: the UI pipeline and the per-frame render context.
//!
//! Convention:
//! - geometry arrives in host GUI units (top-left origin, +Y down)
//! - the vertex shader converts to NDC using the viewport uniform
//! - clip rects are scaled to physical pixels for the scissor

mod common;
mod ctx;
mod ui;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use ui::{UiDraw, UiPipeline, UiVertex};
