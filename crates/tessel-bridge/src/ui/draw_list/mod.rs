//! Draw list: the per-layer geometry recorder.

mod polygon;
mod shapes;

use crate::coords::{Rect, Vec2};
use crate::paint::PackedColor;

use super::{DrawCmd, DrawCmdList, DrawIdx, DrawListSharedData, DrawVert, TextureId};

/// Highest vertex index a single command can address with `DrawIdx`.
const MAX_VTX_PER_CMD: u32 = DrawIdx::MAX as u32 + 1;

/// Records triangles for one layer of a frame.
///
/// Geometry goes into one shared vertex/index buffer. A new [`DrawCmd`] is
/// opened whenever the clip rect changes or the current command runs out of
/// 16-bit index space, so commands are always in paint order.
///
/// # Clipping
///
/// ```ignore
/// list.push_clip_rect(panel_rect, true);
/// // ... children ...
/// list.pop_clip_rect();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    out: DrawCmdList,
    shared: DrawListSharedData,

    clip_stack: Vec<Rect>,

    /// Next vertex index relative to the current command's `vtx_offset`.
    vtx_current_idx: u32,

    /// Points of the path under construction.
    path: Vec<Vec2>,
}

impl DrawList {
    pub fn new(shared: DrawListSharedData) -> Self {
        let mut list = Self::default();
        list.reset(shared);
        list
    }

    /// Clears all geometry and restarts with a single empty command.
    /// Keeps allocated capacity.
    pub fn reset(&mut self, shared: DrawListSharedData) {
        self.shared = shared;
        self.out.vtx_buffer.clear();
        self.out.idx_buffer.clear();
        self.out.cmd_buffer.clear();
        self.clip_stack.clear();
        self.path.clear();
        self.vtx_current_idx = 0;
        self.add_draw_cmd(0);
    }

    #[inline]
    pub fn shared(&self) -> &DrawListSharedData {
        &self.shared
    }

    #[inline]
    pub fn vtx_buffer(&self) -> &[DrawVert] {
        &self.out.vtx_buffer
    }

    #[inline]
    pub fn idx_buffer(&self) -> &[DrawIdx] {
        &self.out.idx_buffer
    }

    #[inline]
    pub fn cmd_buffer(&self) -> &[DrawCmd] {
        &self.out.cmd_buffer
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.idx_buffer.is_empty()
    }

    /// Moves the recorded geometry out, dropping a trailing empty command.
    /// The list must be [`reset`](Self::reset) before recording again.
    pub fn take_cmd_list(&mut self) -> DrawCmdList {
        if self.out.cmd_buffer.last().is_some_and(|c| c.elem_count == 0) {
            self.out.cmd_buffer.pop();
        }
        std::mem::take(&mut self.out)
    }

    // ── clip stack ────────────────────────────────────────────────────────

    /// Current clip rect; the full display when nothing is pushed.
    #[inline]
    pub fn clip_rect(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or(self.shared.clip_rect_fullscreen)
    }

    /// Begins a clip region. With `intersect_with_current` the new rect is
    /// clipped against the active one; disjoint rects yield a zero-area clip.
    pub fn push_clip_rect(&mut self, rect: Rect, intersect_with_current: bool) {
        let rect = rect.normalized();
        let effective = if intersect_with_current {
            self.clip_rect()
                .intersect(rect)
                .unwrap_or(Rect::from_origin_size(rect.origin, Vec2::zero()))
        } else {
            rect
        };
        self.clip_stack.push(effective);
        self.on_changed_clip_rect();
    }

    /// Ends the region opened by the matching [`push_clip_rect`](Self::push_clip_rect).
    pub fn pop_clip_rect(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip_rect without matching push_clip_rect");
        self.clip_stack.pop();
        self.on_changed_clip_rect();
    }

    // ── command bookkeeping ───────────────────────────────────────────────

    fn current_texture(&self) -> TextureId {
        self.shared.font_tex_id
    }

    fn add_draw_cmd(&mut self, vtx_offset: u32) {
        let cmd = DrawCmd {
            clip_rect: self.clip_rect(),
            texture_id: self.current_texture(),
            vtx_offset,
            idx_offset: self.out.idx_buffer.len() as u32,
            elem_count: 0,
        };
        self.out.cmd_buffer.push(cmd);
    }

    fn on_changed_clip_rect(&mut self) {
        let clip = self.clip_rect();
        let cmds = &mut self.out.cmd_buffer;
        let Some(last) = cmds.last().copied() else {
            self.add_draw_cmd(0);
            return;
        };

        if last.elem_count != 0 {
            if last.clip_rect != clip {
                self.add_draw_cmd(last.vtx_offset);
            }
            return;
        }

        // Empty tail command: merge back into the previous one when the
        // state matches again, otherwise retarget it.
        let n = cmds.len();
        if n >= 2 {
            let prev = cmds[n - 2];
            if prev.clip_rect == clip
                && prev.texture_id == last.texture_id
                && prev.vtx_offset == last.vtx_offset
                && prev.idx_offset + prev.elem_count == last.idx_offset
            {
                cmds.pop();
                return;
            }
        }
        if let Some(tail) = cmds.last_mut() {
            tail.clip_rect = clip;
        }
    }

    // ── primitive writing ─────────────────────────────────────────────────

    /// Reserves room for `idx_count` indices and `vtx_count` vertices in the
    /// current command, opening a new command when 16-bit indices would
    /// overflow. A single primitive must not need more than
    /// `MAX_VTX_PER_CMD` vertices; long paths are split by their callers.
    pub fn prim_reserve(&mut self, idx_count: usize, vtx_count: usize) {
        if vtx_count as u32 > MAX_VTX_PER_CMD {
            log::warn!("primitive of {vtx_count} vertices exceeds one command's index range");
        }
        debug_assert!(vtx_count as u32 <= MAX_VTX_PER_CMD, "prim_reserve({idx_count}, {vtx_count}) overflows DrawIdx");
        if self.vtx_current_idx + vtx_count as u32 > MAX_VTX_PER_CMD {
            let vtx_offset = self.out.vtx_buffer.len() as u32;
            self.vtx_current_idx = 0;
            match self.out.cmd_buffer.last_mut() {
                Some(last) if last.elem_count == 0 => {
                    last.vtx_offset = vtx_offset;
                    last.idx_offset = self.out.idx_buffer.len() as u32;
                }
                _ => self.add_draw_cmd(vtx_offset),
            }
        }

        if let Some(last) = self.out.cmd_buffer.last_mut() {
            last.elem_count += idx_count as u32;
        }
        self.out.vtx_buffer.reserve(vtx_count);
        self.out.idx_buffer.reserve(idx_count);
    }

    /// Vertex index the next written vertex will get.
    #[inline]
    pub fn vtx_current_idx(&self) -> u32 {
        self.vtx_current_idx
    }

    #[inline]
    pub fn prim_write_vtx(&mut self, pos: Vec2, uv: Vec2, col: PackedColor) {
        self.out.vtx_buffer.push(DrawVert::new(pos, uv, col.0));
        self.vtx_current_idx += 1;
    }

    #[inline]
    pub fn prim_write_idx(&mut self, idx: u32) {
        self.out.idx_buffer.push(idx as DrawIdx);
    }

    /// Axis-aligned filled quad using the white texel. Requires
    /// `prim_reserve(6, 4)`.
    pub fn prim_rect(&mut self, a: Vec2, c: Vec2, col: PackedColor) {
        let uv = self.shared.tex_uv_white_pixel;
        self.prim_rect_uv(a, c, uv, uv, col);
    }

    /// Axis-aligned textured quad. Requires `prim_reserve(6, 4)`.
    pub fn prim_rect_uv(&mut self, a: Vec2, c: Vec2, uv_a: Vec2, uv_c: Vec2, col: PackedColor) {
        let b = Vec2::new(c.x, a.y);
        let d = Vec2::new(a.x, c.y);
        let uv_b = Vec2::new(uv_c.x, uv_a.y);
        let uv_d = Vec2::new(uv_a.x, uv_c.y);

        let idx = self.vtx_current_idx;
        for i in [idx, idx + 1, idx + 2, idx, idx + 2, idx + 3] {
            self.prim_write_idx(i);
        }
        self.prim_write_vtx(a, uv_a, col);
        self.prim_write_vtx(b, uv_b, col);
        self.prim_write_vtx(c, uv_c, col);
        self.prim_write_vtx(d, uv_d, col);
    }
}
