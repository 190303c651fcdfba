//! wgpu implementation of the bridge's host interfaces.
//!
//! [`WgpuHost`] collects one frame of immediate meshes. Each
//! `render_mesh_immediately` call closes the tessellator's batch and queues
//! it with its texture and the clip rect in effect; [`WgpuHost::render`] then
//! draws the queue in submission order within a single render pass.

mod mesh;
mod textures;

use std::collections::HashSet;
use std::ops::Range;

use tessel_bridge::coords::{Rect, Vec2};
use tessel_bridge::host::{GuiMetrics, MaterialId, PrimitiveMode, RenderContext, ResourceLocation, TextureHandle};

use crate::render::{RenderCtx, RenderTarget, UiDraw, UiPipeline};

pub use mesh::MeshBuilder;
pub use textures::TextureStore;

/// A flushed batch waiting for the render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedBatch {
    pub texture: TextureHandle,
    /// Host GUI units.
    pub clip: Option<Rect>,
    pub vertices: Range<u32>,
}

/// Per-window host: textures, the vertex stream and the batch queue.
pub struct WgpuHost {
    metrics: GuiMetrics,
    materials: HashSet<MaterialId>,
    mesh: MeshBuilder,
    textures: TextureStore,
    batches: Vec<QueuedBatch>,
    clip: Option<Rect>,
    pipeline: UiPipeline,

    warned_material: bool,
    warned_mode: bool,
    warned_texture: bool,
}

impl Default for WgpuHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuHost {
    pub fn new() -> Self {
        Self {
            metrics: GuiMetrics { screen_size: Vec2::zero(), gui_scale: 1.0 },
            materials: HashSet::new(),
            mesh: MeshBuilder::new(),
            textures: TextureStore::new(),
            batches: Vec::new(),
            clip: None,
            pipeline: UiPipeline::new(),
            warned_material: false,
            warned_mode: false,
            warned_texture: false,
        }
    }

    /// Registers a material drawn with the textured, vertex-colored pipeline.
    /// Batches flushed with any other material are dropped.
    pub fn register_material(&mut self, material: MaterialId) {
        log::debug!("material {material} registered");
        self.materials.insert(material);
    }

    /// Screen metrics reported to the bridge for the coming frame.
    pub fn set_gui_metrics(&mut self, metrics: GuiMetrics) {
        self.metrics = metrics;
    }

    #[inline]
    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    #[inline]
    pub fn batches(&self) -> &[QueuedBatch] {
        &self.batches
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuilder {
        &self.mesh
    }

    /// Drops the queued frame without drawing it.
    pub fn discard_frame(&mut self) {
        self.mesh.clear();
        self.batches.clear();
        self.clip = None;
    }

    /// Draws every queued batch into `target` and empties the queue.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.batches.is_empty() {
            self.discard_frame();
            return;
        }

        self.pipeline.prepare(ctx);
        self.textures.sync(ctx, &self.pipeline);

        let mut draws = Vec::with_capacity(self.batches.len());
        for batch in &self.batches {
            match self.textures.bind_group(&batch.texture) {
                Some(texture) => draws.push(UiDraw {
                    vertices: batch.vertices.clone(),
                    clip: batch.clip,
                    texture,
                }),
                None => {
                    if !self.warned_texture {
                        log::warn!(
                            "batch references texture {} #{} which is not resident; skipped",
                            batch.texture.location(),
                            batch.texture.id()
                        );
                        self.warned_texture = true;
                    }
                }
            }
        }

        self.pipeline.render(ctx, target, self.mesh.vertices(), &draws);
        drop(draws);
        self.discard_frame();
    }
}

impl RenderContext for WgpuHost {
    type Tessellator = MeshBuilder;
    type Textures = TextureStore;

    fn gui_metrics(&self) -> GuiMetrics {
        self.metrics
    }

    fn texture_group(&mut self) -> &mut TextureStore {
        &mut self.textures
    }

    fn get_texture(&mut self, location: &ResourceLocation, force_reload: bool) -> TextureHandle {
        self.textures.handle(location, force_reload).unwrap_or_else(|| {
            log::warn!("texture {location} requested before upload");
            // Id 0 is never issued, so this handle never resolves.
            TextureHandle::new(0, location.clone())
        })
    }

    fn tessellator(&mut self) -> &mut MeshBuilder {
        &mut self.mesh
    }

    fn render_mesh_immediately(&mut self, material: &MaterialId, texture: &TextureHandle) {
        let Some((mode, vertices)) = self.mesh.close() else {
            return;
        };

        if !self.materials.contains(material) {
            if !self.warned_material {
                log::warn!("unknown material {material}; batch dropped");
                self.warned_material = true;
            }
            return;
        }
        if mode != PrimitiveMode::TriangleList {
            if !self.warned_mode {
                log::warn!("{mode:?} batches are not supported; batch dropped");
                self.warned_mode = true;
            }
            return;
        }
        if vertices.is_empty() {
            return;
        }

        self.batches.push(QueuedBatch { texture: texture.clone(), clip: self.clip, vertices });
    }

    fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}

#[cfg(test)]
mod tests {
    use tessel_bridge::host::{ImageBuffer, ImageDescription, Tessellator, TextureGroup};

    use super::*;

    const MATERIAL: &str = "ui_texture_and_color_blur";

    fn host() -> WgpuHost {
        let mut host = WgpuHost::new();
        host.register_material(MaterialId::new(MATERIAL));
        host.set_gui_metrics(GuiMetrics { screen_size: Vec2::new(1280.0, 720.0), gui_scale: 2.0 });
        host
    }

    fn font(host: &mut WgpuHost) -> TextureHandle {
        let loc = ResourceLocation::new("imgui_font");
        host.texture_group()
            .upload_texture(&loc, ImageBuffer::new(vec![255; 16], ImageDescription::srgb_rgba8(2, 2)));
        host.get_texture(&loc, false)
    }

    fn triangle(host: &mut WgpuHost) {
        let tess = host.tessellator();
        tess.begin(PrimitiveMode::TriangleList, 3);
        for i in 0..3 {
            tess.color(0xffff_ffff);
            tess.vertex_uv(i as f32, 0.0, 0.0, 0.0, 0.0);
        }
    }

    #[test]
    fn reports_configured_metrics() {
        let host = host();
        assert_eq!(host.gui_metrics().gui_scale, 2.0);
        assert_eq!(host.gui_metrics().screen_size, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn flush_queues_batch_with_current_clip() {
        let mut host = host();
        let tex = font(&mut host);
        let clip = Rect::new(0.0, 0.0, 50.0, 50.0);

        host.set_clip_rect(Some(clip));
        triangle(&mut host);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);
        host.set_clip_rect(None);
        triangle(&mut host);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);

        assert_eq!(
            host.batches(),
            &[
                QueuedBatch { texture: tex.clone(), clip: Some(clip), vertices: 0..3 },
                QueuedBatch { texture: tex, clip: None, vertices: 3..6 },
            ]
        );
    }

    #[test]
    fn unknown_material_and_empty_batches_are_dropped() {
        let mut host = host();
        let tex = font(&mut host);
        triangle(&mut host);
        host.render_mesh_immediately(&MaterialId::new("position_color"), &tex);
        host.tessellator().begin(PrimitiveMode::TriangleList, 0);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);
        assert!(host.batches().is_empty());
    }

    #[test]
    fn unsupported_topology_is_dropped() {
        let mut host = host();
        let tex = font(&mut host);
        host.tessellator().begin(PrimitiveMode::LineList, 2);
        host.tessellator().vertex_uv(0.0, 0.0, 0.0, 0.0, 0.0);
        host.tessellator().vertex_uv(1.0, 1.0, 0.0, 0.0, 0.0);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);
        assert!(host.batches().is_empty());
    }

    #[test]
    fn texture_requested_before_upload_never_resolves() {
        let mut host = host();
        let handle = host.get_texture(&ResourceLocation::new("imgui_font"), false);
        assert_eq!(handle.id(), 0);
        assert!(!host.textures().is_current(&handle));
    }

    #[test]
    fn discard_frame_resets_stream_and_clip() {
        let mut host = host();
        let tex = font(&mut host);
        host.set_clip_rect(Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        triangle(&mut host);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);
        host.discard_frame();

        assert!(host.batches().is_empty());
        assert!(host.mesh().vertices().is_empty());
        triangle(&mut host);
        host.render_mesh_immediately(&MaterialId::new(MATERIAL), &tex);
        assert_eq!(host.batches()[0].clip, None);
    }

    #[test]
    fn bridge_frame_lands_as_queued_batches() {
        use tessel_bridge::ui::{DrawFlags, UiContext};
        use tessel_bridge::OverlayRenderer;

        let mut host = host();
        let mut overlay = OverlayRenderer::default();
        host.register_material(overlay.config().material.clone());
        let mut ui = UiContext::default();
        overlay.initialize(&mut ui);

        overlay.begin_frame(&mut ui, &mut host);
        overlay.draw_filled_rect(&mut ui, Vec2::new(10.0, 10.0), Vec2::new(40.0, 20.0), [0.1, 0.1, 0.1, 0.8], 0.0, DrawFlags::empty());
        let draw_data = ui.render();
        overlay.submit(&draw_data, &mut ui, &mut host);

        assert_eq!(host.batches().len(), 1);
        let batch = &host.batches()[0];
        assert!(host.textures().is_current(&batch.texture));
        assert_eq!(batch.vertices.len(), 6);
        // Positions arrive in GUI units.
        let xs: Vec<f32> = host.mesh().vertices().iter().map(|v| v.pos[0]).collect();
        assert!(xs.iter().all(|x| (5.0..=25.0).contains(x)));
    }
}
