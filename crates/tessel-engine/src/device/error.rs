/// What the runtime should do after the surface refused a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain was configured again; the next redraw can proceed.
    Reconfigured,
    /// Drop this frame and try again on the next redraw.
    SkipFrame,
    /// The device cannot continue (out of memory).
    Fatal,
}
