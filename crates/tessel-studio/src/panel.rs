//! Feature panel drawn through the overlay.

use tessel_bridge::coords::Vec2;
use tessel_bridge::feature::{FeatureRegistry, SettingValue};
use tessel_bridge::paint::Color;
use tessel_bridge::ui::{DrawFlags, FontId, UiContext};
use tessel_bridge::OverlayRenderer;

pub const ROW_HEIGHT: f32 = 24.0;
pub const PANEL_WIDTH: f32 = 280.0;
const PADDING: f32 = 8.0;
const CHECK_SIZE: f32 = 12.0;

const BACKGROUND: [f32; 4] = [0.08, 0.09, 0.11, 0.85];
const BORDER: [f32; 3] = [0.35, 0.38, 0.45];
const ACCENT: [f32; 3] = [0.30, 0.65, 1.00];
const TEXT: Color = Color::rgb(0.92, 0.93, 0.95);
const TEXT_DIM: Color = Color::rgb(0.55, 0.58, 0.62);

/// Panel height for `rows` feature rows.
pub fn panel_height(rows: usize) -> f32 {
    rows as f32 * ROW_HEIGHT + 2.0 * PADDING
}

/// One-line summary of a setting value.
pub fn format_value(value: SettingValue) -> String {
    match value {
        SettingValue::Bool(v) => if v { "on" } else { "off" }.to_string(),
        SettingValue::Int(v) => v.to_string(),
        SettingValue::Float(v) => format!("{v:.2}"),
        SettingValue::Color(c) => {
            let [r, g, b, a] = c.packed().to_bytes();
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// Draws the registry as a list of rows at `origin`: a checkbox, the
/// feature's number key and name, and its first setting. Text is skipped
/// when no font is loaded.
pub fn draw(ui: &mut UiContext, overlay: &OverlayRenderer, features: &FeatureRegistry, font: Option<FontId>, origin: Vec2) {
    let size = Vec2::new(PANEL_WIDTH, panel_height(features.len()));
    overlay.draw_filled_rect(ui, origin, size, BACKGROUND, 6.0, DrawFlags::empty());
    overlay.draw_stroked_rect(ui, origin, size, BORDER, 1.0, 6.0);

    for (row, (_, feature)) in features.iter().enumerate() {
        let top = origin.y + PADDING + row as f32 * ROW_HEIGHT;
        let check = Vec2::new(origin.x + PADDING, top + (ROW_HEIGHT - CHECK_SIZE) * 0.5);

        overlay.draw_stroked_rect(ui, check, Vec2::splat(CHECK_SIZE), BORDER, 1.0, 2.0);
        if feature.is_enabled() {
            let inset = Vec2::splat(3.0);
            overlay.draw_filled_rect(ui, check + inset, Vec2::splat(CHECK_SIZE - 6.0), ACCENT, 0.0, DrawFlags::empty());
        }

        let Some(font) = font else { continue };
        let (list, atlas) = ui.background_with_fonts();
        let text_y = top + 4.0;
        let label = format!("{}  {}", row + 1, feature.display_name());
        list.add_text(atlas, font, Vec2::new(check.x + CHECK_SIZE + PADDING, text_y), TEXT.packed(), &label);

        if let Some(setting) = feature.settings().first() {
            let summary = format!("{}: {}", setting.name(), format_value(setting.value()));
            let x = origin.x + PANEL_WIDTH * 0.55;
            list.add_text(atlas, font, Vec2::new(x, text_y), TEXT_DIM.packed(), &summary);
        }
    }
}
