use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

/// Index type of toolkit index buffers.
pub type DrawIdx = u16;

/// Texture identifier as seen by the toolkit.
///
/// The bridge publishes the host's font texture id here; `NONE` means no
/// texture has been bound yet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextureId(pub u64);

impl TextureId {
    pub const NONE: TextureId = TextureId(0);
}

/// One toolkit vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    pub pos: Vec2,
    pub uv: Vec2,
    /// Packed straight-alpha RGBA, red in the low byte.
    pub col: u32,
}

impl DrawVert {
    #[inline]
    pub const fn new(pos: Vec2, uv: Vec2, col: u32) -> Self {
        Self { pos, uv, col }
    }
}

/// A contiguous run of triangles sharing clip rect and texture.
///
/// Covers `idx_buffer[idx_offset .. idx_offset + elem_count]`; the indices in
/// that range are relative to `vtx_offset`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub clip_rect: Rect,
    pub texture_id: TextureId,
    pub vtx_offset: u32,
    pub idx_offset: u32,
    /// Number of indices; always a multiple of 3.
    pub elem_count: u32,
}

/// Geometry recorded into one draw list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawCmdList {
    pub vtx_buffer: Vec<DrawVert>,
    pub idx_buffer: Vec<DrawIdx>,
    pub cmd_buffer: Vec<DrawCmd>,
}

impl DrawCmdList {
    pub fn new(vtx_buffer: Vec<DrawVert>, idx_buffer: Vec<DrawIdx>, cmd_buffer: Vec<DrawCmd>) -> Self {
        Self { vtx_buffer, idx_buffer, cmd_buffer }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx_buffer.is_empty()
    }

    /// The index slice a command draws from.
    ///
    /// # Panics
    /// Panics if the command's range lies outside the index buffer.
    #[inline]
    pub fn indices(&self, cmd: &DrawCmd) -> &[DrawIdx] {
        let start = cmd.idx_offset as usize;
        &self.idx_buffer[start..start + cmd.elem_count as usize]
    }
}

/// Everything the toolkit produced for one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawData {
    pub display_pos: Vec2,
    pub display_size: Vec2,
    pub cmd_lists: Vec<DrawCmdList>,
}

impl DrawData {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmd_lists.is_empty()
    }

    pub fn total_vtx_count(&self) -> usize {
        self.cmd_lists.iter().map(|l| l.vtx_buffer.len()).sum()
    }

    pub fn total_idx_count(&self) -> usize {
        self.cmd_lists.iter().map(|l| l.idx_buffer.len()).sum()
    }

    pub fn total_cmd_count(&self) -> usize {
        self.cmd_lists.iter().map(|l| l.cmd_buffer.len()).sum()
    }
}
