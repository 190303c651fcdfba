//! The bridge between the UI toolkit and a host engine.
//!
//! Per frame:
//! ```ignore
//! overlay.begin_frame(&mut ui, &mut host);
//! overlay.draw_filled_rect(&mut ui, pos, size, [0.1, 0.1, 0.1, 0.8], 4.0, DrawFlags::empty());
//! let draw_data = ui.render();
//! overlay.submit(&draw_data, &mut ui, &mut host);
//! ```

pub mod frame;
pub mod shapes;
pub mod texture;
pub mod transcode;

use crate::coords::Vec2;
use crate::host::{MaterialId, RenderContext, ResourceLocation};
use crate::paint::Color;
use crate::ui::{DrawData, DrawFlags, UiContext};

use frame::FrameController;
use texture::{FontTexture, FontTextureManager};
use transcode::Transcoder;

/// Fixed identifiers and style flags for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Resource location the font atlas is uploaded under.
    pub font_texture: ResourceLocation,
    /// Host material every batch is flushed with.
    pub material: MaterialId,
    pub anti_aliased_lines: bool,
    pub anti_aliased_fill: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_texture: ResourceLocation::new("imgui_font"),
            material: MaterialId::new("ui_texture_and_color_blur"),
            anti_aliased_lines: true,
            anti_aliased_fill: true,
        }
    }
}

/// Owns the font texture, the frame controller and the transcoder.
#[derive(Debug)]
pub struct OverlayRenderer {
    config: OverlayConfig,
    textures: FontTextureManager,
    frame: FrameController,
    transcoder: Transcoder,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            textures: FontTextureManager::new(config.font_texture.clone()),
            frame: FrameController::new(config.anti_aliased_lines, config.anti_aliased_fill),
            transcoder: Transcoder::new(config.material.clone()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[inline]
    pub fn textures(&self) -> &FontTextureManager {
        &self.textures
    }

    /// Applies the style flags to `ui`. Call once after creating the context.
    pub fn initialize(&mut self, ui: &mut UiContext) {
        self.frame.initialize(ui);
        log::debug!(
            "overlay initialized (material {}, font texture {})",
            self.config.material,
            self.config.font_texture
        );
    }

    pub fn ensure_font_texture<C: RenderContext>(&mut self, ui: &mut UiContext, ctx: &mut C) -> &FontTexture {
        self.textures.ensure_font_texture(ui.fonts_mut(), ctx)
    }

    /// Invalidates the font texture, e.g. after the host reloaded its
    /// resources. The next frame uploads it again.
    pub fn mark_unloaded(&mut self) {
        self.textures.mark_unloaded();
    }

    pub fn begin_frame<C: RenderContext>(&mut self, ui: &mut UiContext, ctx: &mut C) {
        self.frame.begin_frame(ui, &mut self.textures, ctx);
    }

    pub fn submit<C: RenderContext>(&mut self, draw_data: &DrawData, ui: &mut UiContext, ctx: &mut C) {
        self.transcoder.submit(draw_data, &mut self.textures, ui.fonts_mut(), ctx);
    }

    pub fn draw_stroked_rect(
        &self,
        ui: &mut UiContext,
        pos: Vec2,
        size: Vec2,
        color: impl Into<Color>,
        stroke_width: f32,
        corner_radius: f32,
    ) {
        shapes::draw_stroked_rect(ui, pos, size, color, stroke_width, corner_radius);
    }

    pub fn draw_filled_rect(
        &self,
        ui: &mut UiContext,
        pos: Vec2,
        size: Vec2,
        color: impl Into<Color>,
        corner_radius: f32,
        flags: DrawFlags,
    ) {
        shapes::draw_filled_rect(ui, pos, size, color, corner_radius, flags);
    }
}
