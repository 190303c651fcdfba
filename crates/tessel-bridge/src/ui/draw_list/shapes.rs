//! Path building and the public shape API.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::Vec2;
use crate::paint::PackedColor;
use crate::ui::{DrawFlags, FontAtlas, FontId};

use super::DrawList;

/// Maximum distance between a true arc and its polygon approximation.
const CIRCLE_MAX_ERROR: f32 = 0.3;
const CIRCLE_MIN_SEGMENTS: usize = 4;
const CIRCLE_MAX_SEGMENTS: usize = 512;

/// Number of segments needed for `span` radians of an arc of `radius`.
fn arc_segment_count(radius: f32, span: f32) -> usize {
    let full = if radius <= CIRCLE_MAX_ERROR {
        CIRCLE_MIN_SEGMENTS
    } else {
        (PI / (1.0 - CIRCLE_MAX_ERROR / radius).acos()).ceil() as usize
    };
    let full = full.clamp(CIRCLE_MIN_SEGMENTS, CIRCLE_MAX_SEGMENTS);
    ((full as f32 * span.abs() / TAU).ceil() as usize).max(1)
}

impl DrawList {
    // ── path ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn path_clear(&mut self) {
        self.path.clear();
    }

    #[inline]
    pub fn path_line_to(&mut self, p: Vec2) {
        self.path.push(p);
    }

    /// Adds `p` unless it repeats the last point.
    #[inline]
    pub fn path_line_to_merge_duplicate(&mut self, p: Vec2) {
        if self.path.last() != Some(&p) {
            self.path.push(p);
        }
    }

    /// Appends an arc from angle `a_min` to `a_max` (radians, +Y down, so
    /// increasing angles turn clockwise on screen).
    pub fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32) {
        if radius < 0.5 {
            self.path.push(center);
            return;
        }
        let segments = arc_segment_count(radius, a_max - a_min);
        self.path.reserve(segments + 1);
        for i in 0..=segments {
            let a = a_min + (i as f32 / segments as f32) * (a_max - a_min);
            self.path.push(center + Vec2::new(a.cos(), a.sin()) * radius);
        }
    }

    /// Appends a clockwise rectangle outline from `a` (top-left) to `b`
    /// (bottom-right), rounding the corners selected by `flags`.
    pub fn path_rect(&mut self, a: Vec2, b: Vec2, rounding: f32, flags: DrawFlags) {
        let corners = flags.corners();

        let both_x = corners.contains(DrawFlags::ROUND_CORNERS_TOP)
            || corners.contains(DrawFlags::ROUND_CORNERS_BOTTOM);
        let both_y = corners.contains(DrawFlags::ROUND_CORNERS_LEFT)
            || corners.contains(DrawFlags::ROUND_CORNERS_RIGHT);
        let rounding = rounding
            .min((b.x - a.x).abs() * if both_x { 0.5 } else { 1.0 } - 1.0)
            .min((b.y - a.y).abs() * if both_y { 0.5 } else { 1.0 } - 1.0);

        if rounding < 0.5 || flags.rounds_nothing() {
            self.path_line_to(a);
            self.path_line_to(Vec2::new(b.x, a.y));
            self.path_line_to(b);
            self.path_line_to(Vec2::new(a.x, b.y));
            return;
        }

        let r = |corner: DrawFlags| if corners.contains(corner) { rounding } else { 0.0 };
        let tl = r(DrawFlags::ROUND_CORNERS_TOP_LEFT);
        let tr = r(DrawFlags::ROUND_CORNERS_TOP_RIGHT);
        let br = r(DrawFlags::ROUND_CORNERS_BOTTOM_RIGHT);
        let bl = r(DrawFlags::ROUND_CORNERS_BOTTOM_LEFT);

        self.path_arc_to(Vec2::new(a.x + tl, a.y + tl), tl, PI, PI + FRAC_PI_2);
        self.path_arc_to(Vec2::new(b.x - tr, a.y + tr), tr, PI + FRAC_PI_2, TAU);
        self.path_arc_to(Vec2::new(b.x - br, b.y - br), br, 0.0, FRAC_PI_2);
        self.path_arc_to(Vec2::new(a.x + bl, b.y - bl), bl, FRAC_PI_2, PI);
    }

    /// Strokes the current path and clears it.
    pub fn path_stroke(&mut self, col: PackedColor, flags: DrawFlags, thickness: f32) {
        let path = std::mem::take(&mut self.path);
        self.add_polyline(&path, col, flags, thickness);
        self.path = path;
        self.path.clear();
    }

    /// Fills the current path (must be convex) and clears it.
    pub fn path_fill_convex(&mut self, col: PackedColor) {
        let path = std::mem::take(&mut self.path);
        self.add_convex_poly_filled(&path, col);
        self.path = path;
        self.path.clear();
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn add_line(&mut self, p1: Vec2, p2: Vec2, col: PackedColor, thickness: f32) {
        if col.alpha() == 0 {
            return;
        }
        self.path_line_to(p1 + Vec2::splat(0.5));
        self.path_line_to(p2 + Vec2::splat(0.5));
        self.path_stroke(col, DrawFlags::empty(), thickness);
    }

    /// Rectangle outline. The path runs through pixel centers so a
    /// one-pixel stroke lands on whole pixels.
    pub fn add_rect(
        &mut self,
        p_min: Vec2,
        p_max: Vec2,
        col: PackedColor,
        rounding: f32,
        flags: DrawFlags,
        thickness: f32,
    ) {
        if col.alpha() == 0 {
            return;
        }
        let inset_max = if self.shared.anti_aliased_lines { 0.5 } else { 0.49 };
        self.path_rect(p_min + Vec2::splat(0.5), p_max - Vec2::splat(inset_max), rounding, flags);
        self.path_stroke(col, DrawFlags::CLOSED, thickness);
    }

    pub fn add_rect_filled(
        &mut self,
        p_min: Vec2,
        p_max: Vec2,
        col: PackedColor,
        rounding: f32,
        flags: DrawFlags,
    ) {
        if col.alpha() == 0 {
            return;
        }
        if rounding < 0.5 || flags.rounds_nothing() {
            self.prim_reserve(6, 4);
            self.prim_rect(p_min, p_max, col);
        } else {
            self.path_rect(p_min, p_max, rounding, flags);
            self.path_fill_convex(col);
        }
    }

    /// Lays out `text` left to right starting at `pos` (top of the first
    /// line); `'\n'` starts a new line. Characters missing from the font are
    /// drawn as `'?'`, or skipped when the font has no `'?'` either.
    pub fn add_text(&mut self, atlas: &FontAtlas, font: FontId, pos: Vec2, col: PackedColor, text: &str) {
        if col.alpha() == 0 || text.is_empty() {
            return;
        }
        let Some(face) = atlas.font(font) else {
            log::debug!("add_text: unknown {font:?}, skipping");
            return;
        };

        let mut pen = pos;
        for ch in text.chars() {
            if ch == '\n' {
                pen = Vec2::new(pos.x, pen.y + face.line_height());
                continue;
            }
            let Some(glyph) = face.glyph(ch) else { continue };
            if glyph.visible {
                self.prim_reserve(6, 4);
                self.prim_rect_uv(pen + glyph.p0, pen + glyph.p1, glyph.uv0, glyph.uv1, col);
            }
            pen.x += glyph.advance_x;
        }
    }
}
