use tessel_bridge::coords::Vec2;
use tessel_bridge::host::GuiMetrics;
use tessel_bridge::paint::Color;
use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::host::WgpuHost;
use crate::render::{RenderCtx, RenderTarget, Viewport};
use crate::window::RuntimeCtx;

use super::app::AppControl;

pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Drawable size in physical pixels.
    pub fn physical_size(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `'a` is the callback, `'w` the window borrow carried by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub host: &'a mut WgpuHost,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// [`render_scaled`](Self::render_scaled) with the window's scale factor
    /// as GUI scale.
    pub fn render<F>(&mut self, clear: Color, build: F) -> AppControl
    where
        F: FnOnce(&mut WgpuHost),
    {
        let scale = self.window.scale_factor();
        self.render_scaled(scale, clear, build)
    }

    /// Runs one host frame.
    ///
    /// The host reports the physical drawable size as screen size and
    /// `gui_scale` (clamped to `[0.05, 32]`) as physical pixels per GUI
    /// unit. `build` fills the host (typically through the bridge); the
    /// queued batches are then drawn over a cleared surface and presented.
    pub fn render_scaled<F>(&mut self, gui_scale: f32, clear: Color, build: F) -> AppControl
    where
        F: FnOnce(&mut WgpuHost),
    {
        let gui_scale = if gui_scale.is_finite() { gui_scale.clamp(0.05, 32.0) } else { 1.0 };
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return AppControl::Continue;
        }
        let screen = Vec2::new(size.width as f32, size.height as f32);

        self.host.set_gui_metrics(GuiMetrics { screen_size: screen, gui_scale });
        build(&mut *self.host);

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                self.host.discard_frame();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessel clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            Viewport::new(screen.x / gui_scale, screen.y / gui_scale),
            gui_scale,
        );

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.host.render(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
