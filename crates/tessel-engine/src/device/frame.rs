/// A swapchain image plus the encoder recording into it.
///
/// Presenting happens when the surface texture is dropped, so a frame must be
/// handed back to [`Gpu::submit`](super::Gpu::submit) before the next one is
/// acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
