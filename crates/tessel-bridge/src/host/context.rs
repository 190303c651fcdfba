use crate::coords::{Rect, Vec2};

use super::{ImageBuffer, MaterialId, ResourceLocation, TextureHandle};

/// Primitive topology for a tessellator batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveMode {
    TriangleList,
    TriangleStrip,
    LineList,
}

/// Screen metrics reported by the host GUI layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuiMetrics {
    /// Screen size in toolkit pixels.
    pub screen_size: Vec2,
    /// Toolkit pixels per host GUI unit.
    pub gui_scale: f32,
}

/// Host immediate mesh builder.
///
/// A batch is opened with [`begin`](Self::begin); each vertex is a `color`
/// call followed by `vertex_uv`, which consumes the pending color.
pub trait Tessellator {
    fn begin(&mut self, mode: PrimitiveMode, reserved_vertices: u32);
    fn color(&mut self, rgba: u32);
    fn vertex_uv(&mut self, x: f32, y: f32, z: f32, u: f32, v: f32);
}

/// Host texture storage keyed by resource location.
pub trait TextureGroup {
    /// Uploads `image` under `location`, replacing whatever was stored there.
    fn upload_texture(&mut self, location: &ResourceLocation, image: ImageBuffer);
}

/// Per-frame rendering context provided by the host.
pub trait RenderContext {
    type Tessellator: Tessellator;
    type Textures: TextureGroup;

    fn gui_metrics(&self) -> GuiMetrics;

    fn texture_group(&mut self) -> &mut Self::Textures;

    /// Returns a renderable handle for a previously uploaded texture.
    fn get_texture(&mut self, location: &ResourceLocation, force_reload: bool) -> TextureHandle;

    fn tessellator(&mut self) -> &mut Self::Tessellator;

    /// Flushes the tessellator's current batch as one draw with the given
    /// material and texture.
    fn render_mesh_immediately(&mut self, material: &MaterialId, texture: &TextureHandle);

    /// Restricts subsequent batches to `clip` (host GUI units). `None` lifts
    /// the restriction. Hosts without scissor support ignore it.
    fn set_clip_rect(&mut self, clip: Option<Rect>) {
        let _ = clip;
    }
}
