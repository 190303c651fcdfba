use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::host::WgpuHost;

use super::ctx::{FrameCtx, WindowCtx};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub trait App {
    /// Called once per window, before its first frame. Register materials
    /// here.
    fn on_window_created(&mut self, window: &WindowCtx<'_>, host: &mut WgpuHost) {
        let _ = (window, host);
    }

    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw of each window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
