//! Polyline stroking and convex polygon filling.
//!
//! With anti-aliasing enabled both add a one-pixel fringe whose outer
//! vertices carry the stroke color at zero alpha.

use crate::coords::Vec2;
use crate::paint::PackedColor;
use crate::ui::DrawFlags;

use super::{DrawList, MAX_VTX_PER_CMD};

/// Points per polyline chunk. The thick AA stroke uses 4 vertices per point,
/// so a chunk always fits one command's index range.
const POLYLINE_CHUNK_POINTS: usize = MAX_VTX_PER_CMD as usize / 4;

/// Width of the anti-aliasing fringe in toolkit pixels.
const AA_SIZE: f32 = 1.0;

/// Rescales an averaged normal so the miter keeps a constant offset,
/// capped to avoid spikes on very sharp angles.
#[inline]
fn fix_normal(n: Vec2) -> Vec2 {
    let d2 = n.length_sq();
    if d2 > 0.000_001 {
        n * (1.0 / d2).min(100.0)
    } else {
        n
    }
}

impl DrawList {
    /// Strokes `points` with `thickness`. `DrawFlags::CLOSED` joins the last
    /// point back to the first.
    pub fn add_polyline(&mut self, points: &[Vec2], col: PackedColor, flags: DrawFlags, thickness: f32) {
        let n = points.len();
        if n < 2 || col.alpha() == 0 {
            return;
        }

        let closed = flags.contains(DrawFlags::CLOSED);
        if n > POLYLINE_CHUNK_POINTS {
            self.polyline_chunked(points, col, closed, thickness);
            return;
        }
        let count = if closed { n } else { n - 1 };

        if self.shared.anti_aliased_lines {
            self.polyline_aa(points, col, closed, count, thickness);
        } else {
            self.polyline_plain(points, col, count, thickness);
        }
    }

    /// Strokes a long path as open runs sharing their end points.
    fn polyline_chunked(&mut self, points: &[Vec2], col: PackedColor, closed: bool, thickness: f32) {
        let wrapped;
        let path = if closed {
            wrapped = [points, &points[..1]].concat();
            &wrapped[..]
        } else {
            points
        };
        for start in (0..path.len() - 1).step_by(POLYLINE_CHUNK_POINTS - 1) {
            let end = (start + POLYLINE_CHUNK_POINTS).min(path.len());
            self.add_polyline(&path[start..end], col, DrawFlags::empty(), thickness);
        }
    }

    fn polyline_plain(&mut self, points: &[Vec2], col: PackedColor, count: usize, thickness: f32) {
        let n = points.len();
        let uv = self.shared.tex_uv_white_pixel;

        self.prim_reserve(count * 6, count * 4);
        for i1 in 0..count {
            let i2 = if i1 + 1 == n { 0 } else { i1 + 1 };
            let p1 = points[i1];
            let p2 = points[i2];
            let d = (p2 - p1).normalize_or_self() * (thickness * 0.5);
            let side = d.perp();

            let idx = self.vtx_current_idx;
            for i in [idx, idx + 1, idx + 2, idx, idx + 2, idx + 3] {
                self.prim_write_idx(i);
            }
            self.prim_write_vtx(p1 + side, uv, col);
            self.prim_write_vtx(p2 + side, uv, col);
            self.prim_write_vtx(p2 - side, uv, col);
            self.prim_write_vtx(p1 - side, uv, col);
        }
    }

    fn polyline_aa(&mut self, points: &[Vec2], col: PackedColor, closed: bool, count: usize, thickness: f32) {
        let n = points.len();
        let uv = self.shared.tex_uv_white_pixel;
        let col_trans = col.transparent();
        let thick_line = thickness > AA_SIZE;
        let thickness = thickness.max(1.0);

        let (idx_count, vtx_count) = if thick_line { (count * 18, n * 4) } else { (count * 12, n * 3) };
        self.prim_reserve(idx_count, vtx_count);

        let mut normals = vec![Vec2::zero(); n];
        for i1 in 0..count {
            let i2 = if i1 + 1 == n { 0 } else { i1 + 1 };
            normals[i1] = (points[i2] - points[i1]).normalize_or_self().perp();
        }
        if !closed {
            normals[n - 1] = normals[n - 2];
        }

        let base = self.vtx_current_idx;

        if !thick_line {
            // Core line is the points themselves; two fringe rows on each side.
            let half = AA_SIZE;
            let mut temp = vec![Vec2::zero(); n * 2];
            if !closed {
                temp[0] = points[0] + normals[0] * half;
                temp[1] = points[0] - normals[0] * half;
                temp[(n - 1) * 2] = points[n - 1] + normals[n - 1] * half;
                temp[(n - 1) * 2 + 1] = points[n - 1] - normals[n - 1] * half;
            }

            let mut idx1 = base;
            for i1 in 0..count {
                let i2 = if i1 + 1 == n { 0 } else { i1 + 1 };
                let idx2 = if i1 + 1 == n { base } else { idx1 + 3 };

                let dm = fix_normal((normals[i1] + normals[i2]) * 0.5) * half;
                temp[i2 * 2] = points[i2] + dm;
                temp[i2 * 2 + 1] = points[i2] - dm;

                for i in [
                    idx2, idx1, idx1 + 2,
                    idx1 + 2, idx2 + 2, idx2,
                    idx2 + 1, idx1 + 1, idx1,
                    idx1, idx2, idx2 + 1,
                ] {
                    self.prim_write_idx(i);
                }
                idx1 = idx2;
            }

            for i in 0..n {
                self.prim_write_vtx(points[i], uv, col);
                self.prim_write_vtx(temp[i * 2], uv, col_trans);
                self.prim_write_vtx(temp[i * 2 + 1], uv, col_trans);
            }
        } else {
            // Solid core of `thickness - AA_SIZE` plus a fringe on both edges.
            let half_inner = (thickness - AA_SIZE) * 0.5;
            let mut temp = vec![Vec2::zero(); n * 4];
            if !closed {
                for (slot, i) in [(0, 0), (n - 1, n - 1)] {
                    let p = points[i];
                    let nrm = normals[i];
                    temp[slot * 4] = p + nrm * (half_inner + AA_SIZE);
                    temp[slot * 4 + 1] = p + nrm * half_inner;
                    temp[slot * 4 + 2] = p - nrm * half_inner;
                    temp[slot * 4 + 3] = p - nrm * (half_inner + AA_SIZE);
                }
            }

            let mut idx1 = base;
            for i1 in 0..count {
                let i2 = if i1 + 1 == n { 0 } else { i1 + 1 };
                let idx2 = if i1 + 1 == n { base } else { idx1 + 4 };

                let dm = fix_normal((normals[i1] + normals[i2]) * 0.5);
                let dm_out = dm * (half_inner + AA_SIZE);
                let dm_in = dm * half_inner;
                let p = points[i2];
                temp[i2 * 4] = p + dm_out;
                temp[i2 * 4 + 1] = p + dm_in;
                temp[i2 * 4 + 2] = p - dm_in;
                temp[i2 * 4 + 3] = p - dm_out;

                for i in [
                    idx2 + 1, idx1 + 1, idx1 + 2,
                    idx1 + 2, idx2 + 2, idx2 + 1,
                    idx2 + 1, idx1 + 1, idx1,
                    idx1, idx2, idx2 + 1,
                    idx2 + 2, idx1 + 2, idx1 + 3,
                    idx1 + 3, idx2 + 3, idx2 + 2,
                ] {
                    self.prim_write_idx(i);
                }
                idx1 = idx2;
            }

            for i in 0..n {
                self.prim_write_vtx(temp[i * 4], uv, col_trans);
                self.prim_write_vtx(temp[i * 4 + 1], uv, col);
                self.prim_write_vtx(temp[i * 4 + 2], uv, col);
                self.prim_write_vtx(temp[i * 4 + 3], uv, col_trans);
            }
        }
    }

    /// Fills a convex polygon. Points are expected in clockwise screen order
    /// for the fringe to land outside the shape.
    pub fn add_convex_poly_filled(&mut self, points: &[Vec2], col: PackedColor) {
        let n = points.len();
        if n < 3 || col.alpha() == 0 {
            return;
        }
        let uv = self.shared.tex_uv_white_pixel;

        // Too many points for a fringed fill in one command: plain fan.
        if !self.shared.anti_aliased_fill || n * 2 > MAX_VTX_PER_CMD as usize {
            self.fan_chunked(points, col);
            return;
        }

        let col_trans = col.transparent();
        self.prim_reserve((n - 2) * 3 + n * 6, n * 2);

        // Vertices are interleaved: even = inner (opaque), odd = outer fringe.
        let inner = self.vtx_current_idx;
        let outer = inner + 1;

        for i in 2..n as u32 {
            self.prim_write_idx(inner);
            self.prim_write_idx(inner + ((i - 1) << 1));
            self.prim_write_idx(inner + (i << 1));
        }

        let mut normals = vec![Vec2::zero(); n];
        let mut i0 = n - 1;
        for i1 in 0..n {
            normals[i0] = (points[i1] - points[i0]).normalize_or_self().perp();
            i0 = i1;
        }

        let mut i0 = n - 1;
        for i1 in 0..n {
            let dm = fix_normal((normals[i0] + normals[i1]) * 0.5) * (AA_SIZE * 0.5);
            self.prim_write_vtx(points[i1] - dm, uv, col);
            self.prim_write_vtx(points[i1] + dm, uv, col_trans);

            let (a, b) = ((i1 as u32) << 1, (i0 as u32) << 1);
            for i in [inner + a, inner + b, outer + b, outer + b, outer + a, inner + a] {
                self.prim_write_idx(i);
            }
            i0 = i1;
        }
    }

    /// Plain triangle fan, split into fans that share the first point when
    /// the polygon does not fit one command.
    fn fan_chunked(&mut self, points: &[Vec2], col: PackedColor) {
        let max = MAX_VTX_PER_CMD as usize;
        if points.len() <= max {
            self.fan_plain(points, col);
            return;
        }
        let mut chunk = Vec::with_capacity(max);
        let mut start = 1;
        while start + 1 < points.len() {
            let end = (start + max - 1).min(points.len());
            chunk.clear();
            chunk.push(points[0]);
            chunk.extend_from_slice(&points[start..end]);
            self.fan_plain(&chunk, col);
            start = end - 1;
        }
    }

    fn fan_plain(&mut self, points: &[Vec2], col: PackedColor) {
        let n = points.len();
        let uv = self.shared.tex_uv_white_pixel;
        self.prim_reserve((n - 2) * 3, n);
        let base = self.vtx_current_idx;
        for &p in points {
            self.prim_write_vtx(p, uv, col);
        }
        for i in 2..n as u32 {
            self.prim_write_idx(base);
            self.prim_write_idx(base + i - 1);
            self.prim_write_idx(base + i);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Rect;
    use crate::ui::{DrawListSharedData, TextureId};

    use super::*;

    fn list(aa: bool) -> DrawList {
        DrawList::new(DrawListSharedData {
            tex_uv_white_pixel: Vec2::new(0.5, 0.5),
            font_tex_id: TextureId(1),
            clip_rect_fullscreen: Rect::new(0.0, 0.0, 100.0, 100.0),
            anti_aliased_lines: aa,
            anti_aliased_fill: aa,
        })
    }

    fn square() -> [Vec2; 4] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    fn check_consistent(l: &DrawList) {
        let cmd = l.cmd_buffer()[0];
        assert_eq!(cmd.elem_count as usize, l.idx_buffer().len());
        assert_eq!(cmd.elem_count % 3, 0);
        let n = l.vtx_buffer().len();
        assert!(l.idx_buffer().iter().all(|&i| (i as usize) < n));
    }

    #[test]
    fn plain_fill_is_a_triangle_fan() {
        let mut l = list(false);
        l.add_convex_poly_filled(&square(), PackedColor::WHITE);
        assert_eq!(l.vtx_buffer().len(), 4);
        assert_eq!(l.idx_buffer(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn aa_fill_adds_transparent_fringe_outside() {
        let mut l = list(true);
        l.add_convex_poly_filled(&square(), PackedColor::WHITE);
        check_consistent(&l);

        let v = l.vtx_buffer();
        assert_eq!(v.len(), 8);
        assert_eq!(l.idx_buffer().len(), 2 * 3 + 4 * 6);

        // Top-left corner: inner vertex moves inward, outer outward.
        assert_eq!(v[0].col, PackedColor::WHITE.0);
        assert_eq!(v[1].col, PackedColor::WHITE.transparent().0);
        assert!(v[0].pos.x > 0.0 && v[0].pos.y > 0.0);
        assert!(v[1].pos.x < 0.0 && v[1].pos.y < 0.0);
    }

    #[test]
    fn plain_polyline_emits_one_quad_per_segment() {
        let mut l = list(false);
        l.add_polyline(&square(), PackedColor::WHITE, DrawFlags::CLOSED, 2.0);
        check_consistent(&l);
        assert_eq!(l.vtx_buffer().len(), 16);
        assert_eq!(l.idx_buffer().len(), 24);

        l.reset(*l.shared());
        l.add_polyline(&square(), PackedColor::WHITE, DrawFlags::empty(), 2.0);
        assert_eq!(l.vtx_buffer().len(), 12);
    }

    #[test]
    fn aa_thin_polyline_counts() {
        let mut l = list(true);
        l.add_polyline(&square(), PackedColor::WHITE, DrawFlags::CLOSED, 1.0);
        check_consistent(&l);
        assert_eq!(l.vtx_buffer().len(), 4 * 3);
        assert_eq!(l.idx_buffer().len(), 4 * 12);
    }

    #[test]
    fn aa_thick_polyline_counts() {
        let mut l = list(true);
        l.add_polyline(&square(), PackedColor::WHITE, DrawFlags::empty(), 3.0);
        check_consistent(&l);
        assert_eq!(l.vtx_buffer().len(), 4 * 4);
        assert_eq!(l.idx_buffer().len(), 3 * 18);
    }

    #[test]
    fn invisible_or_degenerate_input_draws_nothing() {
        let mut l = list(true);
        l.add_polyline(&square()[..1], PackedColor::WHITE, DrawFlags::CLOSED, 1.0);
        l.add_convex_poly_filled(&square()[..2], PackedColor::WHITE);
        l.add_convex_poly_filled(&square(), PackedColor::WHITE.transparent());
        assert!(l.is_empty());
    }

    /// Every command's indices address vertices inside the buffer and inside
    /// its own 16-bit window.
    fn check_all_commands(l: &DrawList) {
        let vtx_len = l.vtx_buffer().len();
        for cmd in l.cmd_buffer() {
            let start = cmd.idx_offset as usize;
            let idx = &l.idx_buffer()[start..start + cmd.elem_count as usize];
            assert_eq!(idx.len() % 3, 0);
            for &i in idx {
                assert!(cmd.vtx_offset as usize + (i as usize) < vtx_len);
            }
        }
    }

    fn zigzag(n: usize) -> Vec<Vec2> {
        (0..n).map(|i| Vec2::new(i as f32 * 0.01, (i % 2) as f32)).collect()
    }

    #[test]
    fn long_plain_polyline_is_split_across_commands() {
        let mut l = list(false);
        l.add_polyline(&zigzag(20_000), PackedColor::WHITE, DrawFlags::empty(), 1.0);
        check_all_commands(&l);
        assert!(l.cmd_buffer().len() > 1);
        // Chunks overlap by one point, so every segment is still drawn once.
        assert_eq!(l.vtx_buffer().len(), 19_999 * 4);
        assert_eq!(l.idx_buffer().len(), 19_999 * 6);
    }

    #[test]
    fn long_closed_aa_polyline_stays_addressable() {
        let mut l = list(true);
        l.add_polyline(&zigzag(40_000), PackedColor::WHITE, DrawFlags::CLOSED, 3.0);
        check_all_commands(&l);
        assert!(l.cmd_buffer().len() >= 3);
    }

    #[test]
    fn huge_fill_falls_back_to_split_fans() {
        let points: Vec<Vec2> = (0..70_000)
            .map(|i| {
                let a = i as f32 / 70_000.0 * std::f32::consts::TAU;
                Vec2::new(a.cos(), a.sin()) * 100.0
            })
            .collect();
        let mut l = list(true);
        l.add_convex_poly_filled(&points, PackedColor::WHITE);
        check_all_commands(&l);
        assert_eq!(l.cmd_buffer().len(), 2);
        // Same triangle count as a single fan.
        assert_eq!(l.idx_buffer().len(), (70_000 - 2) * 3);
        assert!(l.vtx_buffer().iter().all(|v| v.col == PackedColor::WHITE.0));
    }
}
