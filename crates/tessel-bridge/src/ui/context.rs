use crate::coords::{Rect, Vec2};

use super::{DrawData, DrawList, FontAtlas, TextureId};

/// Per-frame state every draw list reads while recording.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DrawListSharedData {
    pub tex_uv_white_pixel: Vec2,
    pub font_tex_id: TextureId,
    pub clip_rect_fullscreen: Rect,
    pub anti_aliased_lines: bool,
    pub anti_aliased_fill: bool,
}

/// Input/output state exchanged with the platform each frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Io {
    /// Display size in toolkit pixels.
    pub display_size: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub anti_aliased_lines: bool,
    pub anti_aliased_fill: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self { anti_aliased_lines: true, anti_aliased_fill: true }
    }
}

/// Toolkit state for one display.
///
/// Frame protocol:
/// ```ignore
/// ui.io_mut().display_size = size;
/// ui.new_frame();
/// ui.background_draw_list().add_rect_filled(..);
/// let draw_data = ui.render();
/// ```
pub struct UiContext {
    io: Io,
    style: Style,
    fonts: FontAtlas,

    background: DrawList,
    foreground: DrawList,

    frame_count: u64,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(FontAtlas::new())
    }
}

impl UiContext {
    pub fn new(fonts: FontAtlas) -> Self {
        Self {
            io: Io::default(),
            style: Style::default(),
            fonts,
            background: DrawList::default(),
            foreground: DrawList::default(),
            frame_count: 0,
        }
    }

    #[inline]
    pub fn io(&self) -> &Io {
        &self.io
    }

    #[inline]
    pub fn io_mut(&mut self) -> &mut Io {
        &mut self.io
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    #[inline]
    pub fn fonts(&self) -> &FontAtlas {
        &self.fonts
    }

    #[inline]
    pub fn fonts_mut(&mut self) -> &mut FontAtlas {
        &mut self.fonts
    }

    /// Number of frames opened so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Opens a frame: builds pending fonts, snapshots the shared draw state
    /// and clears both draw lists.
    pub fn new_frame(&mut self) {
        self.fonts.build();

        let shared = DrawListSharedData {
            tex_uv_white_pixel: self.fonts.white_uv(),
            font_tex_id: self.fonts.tex_id(),
            clip_rect_fullscreen: Rect::from_origin_size(Vec2::zero(), self.io.display_size),
            anti_aliased_lines: self.style.anti_aliased_lines,
            anti_aliased_fill: self.style.anti_aliased_fill,
        };
        self.background.reset(shared);
        self.foreground.reset(shared);
        self.frame_count += 1;
    }

    /// Layer drawn beneath everything else.
    #[inline]
    pub fn background_draw_list(&mut self) -> &mut DrawList {
        &mut self.background
    }

    /// Layer drawn above everything else.
    #[inline]
    pub fn foreground_draw_list(&mut self) -> &mut DrawList {
        &mut self.foreground
    }

    /// Background list together with the atlas, for `add_text`.
    #[inline]
    pub fn background_with_fonts(&mut self) -> (&mut DrawList, &FontAtlas) {
        (&mut self.background, &self.fonts)
    }

    /// Foreground list together with the atlas, for `add_text`.
    #[inline]
    pub fn foreground_with_fonts(&mut self) -> (&mut DrawList, &FontAtlas) {
        (&mut self.foreground, &self.fonts)
    }

    /// Closes the frame and moves the recorded geometry out, background
    /// first. Lists without geometry are skipped.
    pub fn render(&mut self) -> DrawData {
        let cmd_lists = [&mut self.background, &mut self.foreground]
            .into_iter()
            .filter(|l| !l.is_empty())
            .map(DrawList::take_cmd_list)
            .collect();

        DrawData { display_pos: Vec2::zero(), display_size: self.io.display_size, cmd_lists }
    }
}

#[cfg(test)]
mod tests {
    use crate::paint::PackedColor;
    use crate::ui::{DrawFlags, FontAtlasSource};

    use super::*;

    fn frame(ui: &mut UiContext, w: f32, h: f32) {
        ui.io_mut().display_size = Vec2::new(w, h);
        ui.new_frame();
    }

    #[test]
    fn new_frame_snapshots_display_and_style() {
        let mut ui = UiContext::default();
        ui.style_mut().anti_aliased_fill = false;
        frame(&mut ui, 640.0, 480.0);

        let shared = *ui.background_draw_list().shared();
        assert_eq!(shared.clip_rect_fullscreen, Rect::new(0.0, 0.0, 640.0, 480.0));
        assert!(shared.anti_aliased_lines);
        assert!(!shared.anti_aliased_fill);
        assert_eq!(shared.tex_uv_white_pixel, ui.fonts().white_uv());
        assert_eq!(ui.frame_count(), 1);
    }

    #[test]
    fn new_frame_picks_up_published_tex_id() {
        let mut ui = UiContext::default();
        ui.fonts_mut().set_tex_id(TextureId(9));
        frame(&mut ui, 100.0, 100.0);
        assert_eq!(ui.foreground_draw_list().shared().font_tex_id, TextureId(9));
    }

    #[test]
    fn render_orders_background_before_foreground() {
        let mut ui = UiContext::default();
        frame(&mut ui, 100.0, 100.0);
        let red = PackedColor::from_bytes(255, 0, 0, 255);
        let blue = PackedColor::from_bytes(0, 0, 255, 255);
        ui.foreground_draw_list()
            .add_rect_filled(Vec2::zero(), Vec2::splat(5.0), blue, 0.0, DrawFlags::empty());
        ui.background_draw_list()
            .add_rect_filled(Vec2::zero(), Vec2::splat(5.0), red, 0.0, DrawFlags::empty());

        let data = ui.render();
        assert_eq!(data.cmd_lists.len(), 2);
        assert_eq!(data.cmd_lists[0].vtx_buffer[0].col, red.0);
        assert_eq!(data.cmd_lists[1].vtx_buffer[0].col, blue.0);
        assert_eq!(data.display_size, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn empty_frame_renders_no_lists() {
        let mut ui = UiContext::default();
        frame(&mut ui, 100.0, 100.0);
        assert!(ui.render().is_empty());
    }

    #[test]
    fn lists_are_cleared_between_frames() {
        let mut ui = UiContext::default();
        frame(&mut ui, 100.0, 100.0);
        ui.background_draw_list()
            .add_rect_filled(Vec2::zero(), Vec2::splat(5.0), PackedColor::WHITE, 0.0, DrawFlags::empty());
        assert_eq!(ui.render().total_vtx_count(), 4);

        frame(&mut ui, 100.0, 100.0);
        assert!(ui.render().is_empty());
    }
}
