//! Host double that records every call in order.

use crate::coords::{Rect, Vec2};

use super::{
    GuiMetrics, ImageBuffer, ImageDescription, MaterialId, PrimitiveMode, RenderContext,
    ResourceLocation, Tessellator, TextureGroup, TextureHandle,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    Upload { location: ResourceLocation, description: ImageDescription },
    GetTexture { location: ResourceLocation, force_reload: bool },
    Begin(PrimitiveMode),
    Color(u32),
    VertexUv { x: f32, y: f32, z: f32, u: f32, v: f32 },
    Flush { material: MaterialId, texture: TextureHandle },
    Clip(Option<Rect>),
}

impl HostCall {
    pub(crate) fn is_texture_access(&self) -> bool {
        matches!(self, HostCall::Upload { .. } | HostCall::GetTexture { .. })
    }

    pub(crate) fn is_tessellator(&self) -> bool {
        matches!(self, HostCall::Begin(_) | HostCall::Color(_) | HostCall::VertexUv { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedVertex {
    pub color: u32,
    pub pos: Vec2,
    pub uv: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedBatch {
    pub mode: PrimitiveMode,
    pub vertices: Vec<RecordedVertex>,
    pub material: MaterialId,
    pub texture: TextureHandle,
}

pub(crate) struct RecordingHost {
    pub metrics: GuiMetrics,
    pub calls: Vec<HostCall>,
    pub last_upload: Option<ImageBuffer>,
    generation: u64,
}

impl RecordingHost {
    pub(crate) fn new(screen_size: Vec2, gui_scale: f32) -> Self {
        Self {
            metrics: GuiMetrics { screen_size, gui_scale },
            calls: Vec::new(),
            last_upload: None,
            generation: 0,
        }
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, HostCall::Upload { .. })).count()
    }

    pub(crate) fn texture_access_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_texture_access()).count()
    }

    pub(crate) fn begin_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, HostCall::Begin(_))).count()
    }

    pub(crate) fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Regroups the call log into flushed batches.
    pub(crate) fn batches(&self) -> Vec<RecordedBatch> {
        let mut out = Vec::new();
        let mut open: Option<(PrimitiveMode, Vec<RecordedVertex>)> = None;
        let mut pending_color = 0u32;

        for call in &self.calls {
            match call {
                HostCall::Begin(mode) => open = Some((*mode, Vec::new())),
                HostCall::Color(c) => pending_color = *c,
                HostCall::VertexUv { x, y, u, v, .. } => {
                    if let Some((_, verts)) = open.as_mut() {
                        verts.push(RecordedVertex {
                            color: pending_color,
                            pos: Vec2::new(*x, *y),
                            uv: Vec2::new(*u, *v),
                        });
                    }
                }
                HostCall::Flush { material, texture } => {
                    if let Some((mode, vertices)) = open.take() {
                        out.push(RecordedBatch {
                            mode,
                            vertices,
                            material: material.clone(),
                            texture: texture.clone(),
                        });
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl Tessellator for RecordingHost {
    fn begin(&mut self, mode: PrimitiveMode, _reserved_vertices: u32) {
        self.calls.push(HostCall::Begin(mode));
    }

    fn color(&mut self, rgba: u32) {
        self.calls.push(HostCall::Color(rgba));
    }

    fn vertex_uv(&mut self, x: f32, y: f32, z: f32, u: f32, v: f32) {
        self.calls.push(HostCall::VertexUv { x, y, z, u, v });
    }
}

impl TextureGroup for RecordingHost {
    fn upload_texture(&mut self, location: &ResourceLocation, image: ImageBuffer) {
        self.generation += 1;
        self.calls.push(HostCall::Upload {
            location: location.clone(),
            description: image.description,
        });
        self.last_upload = Some(image);
    }
}

impl RenderContext for RecordingHost {
    type Tessellator = Self;
    type Textures = Self;

    fn gui_metrics(&self) -> GuiMetrics {
        self.metrics
    }

    fn texture_group(&mut self) -> &mut Self {
        self
    }

    fn get_texture(&mut self, location: &ResourceLocation, force_reload: bool) -> TextureHandle {
        self.calls.push(HostCall::GetTexture { location: location.clone(), force_reload });
        TextureHandle::new(self.generation, location.clone())
    }

    fn tessellator(&mut self) -> &mut Self {
        self
    }

    fn render_mesh_immediately(&mut self, material: &MaterialId, texture: &TextureHandle) {
        self.calls.push(HostCall::Flush { material: material.clone(), texture: texture.clone() });
    }

    fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.calls.push(HostCall::Clip(clip));
    }
}
