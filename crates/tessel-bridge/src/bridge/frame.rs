use crate::host::RenderContext;
use crate::ui::UiContext;

use super::texture::FontTextureManager;

/// Per-frame toolkit setup.
#[derive(Debug, Copy, Clone)]
pub struct FrameController {
    anti_aliased_lines: bool,
    anti_aliased_fill: bool,
}

impl FrameController {
    pub fn new(anti_aliased_lines: bool, anti_aliased_fill: bool) -> Self {
        Self { anti_aliased_lines, anti_aliased_fill }
    }

    /// Applies the fixed style flags. Called once.
    pub fn initialize(&self, ui: &mut UiContext) {
        let style = ui.style_mut();
        style.anti_aliased_lines = self.anti_aliased_lines;
        style.anti_aliased_fill = self.anti_aliased_fill;
    }

    /// Syncs the display size, refreshes the font texture when it is stale
    /// and opens the toolkit frame.
    ///
    /// The refresh happens before the frame opens so the draw lists pick up
    /// the new texture id.
    pub fn begin_frame<C: RenderContext>(
        &self,
        ui: &mut UiContext,
        textures: &mut FontTextureManager,
        ctx: &mut C,
    ) {
        ui.io_mut().display_size = ctx.gui_metrics().screen_size;

        if ui.fonts().is_dirty() && textures.is_valid() {
            textures.mark_unloaded();
        }
        if !textures.is_valid() {
            textures.ensure_font_texture(ui.fonts_mut(), ctx);
        }

        ui.new_frame();
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{Rect, Vec2};
    use crate::host::recording::RecordingHost;
    use crate::host::ResourceLocation;
    use crate::ui::TextureId;

    use super::*;

    fn setup() -> (FrameController, UiContext, FontTextureManager, RecordingHost) {
        (
            FrameController::new(true, true),
            UiContext::default(),
            FontTextureManager::new(ResourceLocation::new("imgui_font")),
            RecordingHost::new(Vec2::new(1280.0, 720.0), 2.0),
        )
    }

    #[test]
    fn initialize_sets_style_flags() {
        let (_, mut ui, _, _) = setup();
        ui.style_mut().anti_aliased_lines = false;
        FrameController::new(true, false).initialize(&mut ui);
        assert!(ui.style().anti_aliased_lines);
        assert!(!ui.style().anti_aliased_fill);
    }

    #[test]
    fn begin_frame_syncs_display_size() {
        let (frame, mut ui, mut textures, mut host) = setup();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(ui.io().display_size, Vec2::new(1280.0, 720.0));
        assert_eq!(
            ui.background_draw_list().clip_rect(),
            Rect::new(0.0, 0.0, 1280.0, 720.0)
        );
    }

    #[test]
    fn zero_sized_viewport_is_accepted() {
        let (frame, mut ui, mut textures, mut host) = setup();
        host.metrics.screen_size = Vec2::zero();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(ui.io().display_size, Vec2::zero());
        assert!(ui.render().is_empty());
    }

    #[test]
    fn begin_frame_refreshes_stale_texture_before_opening_frame() {
        let (frame, mut ui, mut textures, mut host) = setup();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 1);

        let first_id = ui.background_draw_list().shared().font_tex_id;
        assert_ne!(first_id, TextureId::NONE);

        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 1);

        textures.mark_unloaded();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 2);
        assert!(textures.is_valid());
        assert_ne!(ui.background_draw_list().shared().font_tex_id, first_id);
    }

    #[test]
    fn dirty_atlas_is_rebuilt_and_uploaded_again() {
        let (frame, mut ui, mut textures, mut host) = setup();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 1);
        let first_id = ui.background_draw_list().shared().font_tex_id;

        ui.fonts_mut().mark_dirty();
        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 2);
        assert!(!ui.fonts().is_dirty());
        assert!(textures.is_valid());
        assert_ne!(ui.background_draw_list().shared().font_tex_id, first_id);

        frame.begin_frame(&mut ui, &mut textures, &mut host);
        assert_eq!(host.upload_count(), 2);
    }
}
