//! Rectangle helpers drawing onto the toolkit's background layer.

use crate::coords::Vec2;
use crate::paint::Color;
use crate::ui::{DrawFlags, UiContext};

/// Outlined rectangle at `pos` with `size`, in toolkit pixels.
pub fn draw_stroked_rect(
    ui: &mut UiContext,
    pos: Vec2,
    size: Vec2,
    color: impl Into<Color>,
    stroke_width: f32,
    corner_radius: f32,
) {
    let col = color.into().packed();
    ui.background_draw_list()
        .add_rect(pos, pos + size, col, corner_radius, DrawFlags::empty(), stroke_width);
}

/// Filled rectangle; `flags` selects the rounded corners.
pub fn draw_filled_rect(
    ui: &mut UiContext,
    pos: Vec2,
    size: Vec2,
    color: impl Into<Color>,
    corner_radius: f32,
    flags: DrawFlags,
) {
    let col = color.into().packed();
    ui.background_draw_list()
        .add_rect_filled(pos, pos + size, col, corner_radius, flags);
}
