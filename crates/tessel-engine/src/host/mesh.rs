use std::ops::Range;

use tessel_bridge::host::{PrimitiveMode, Tessellator};

use crate::render::UiVertex;

#[derive(Debug, Copy, Clone)]
struct OpenBatch {
    mode: PrimitiveMode,
    start: usize,
}

/// Immediate mesh builder feeding one vertex stream per frame.
///
/// Batches are contiguous ranges of the stream. A batch begun while another
/// is still open replaces it; the unflushed vertices are discarded.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<UiVertex>,
    pending_color: u32,
    open: Option<OpenBatch>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertices(&self) -> &[UiVertex] {
        &self.vertices
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Ends the open batch and returns its mode and vertex range.
    pub fn close(&mut self) -> Option<(PrimitiveMode, Range<u32>)> {
        let open = self.open.take()?;
        Some((open.mode, open.start as u32..self.vertices.len() as u32))
    }

    /// Drops everything built this frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.open = None;
        self.pending_color = 0;
    }
}

impl Tessellator for MeshBuilder {
    fn begin(&mut self, mode: PrimitiveMode, reserved_vertices: u32) {
        if let Some(stale) = self.open.take() {
            log::debug!(
                "batch begun with {} unflushed vertices pending; discarding them",
                self.vertices.len() - stale.start
            );
            self.vertices.truncate(stale.start);
        }
        self.vertices.reserve(reserved_vertices as usize);
        self.open = Some(OpenBatch { mode, start: self.vertices.len() });
    }

    fn color(&mut self, rgba: u32) {
        self.pending_color = rgba;
    }

    fn vertex_uv(&mut self, x: f32, y: f32, _z: f32, u: f32, v: f32) {
        if self.open.is_none() {
            return;
        }
        self.vertices.push(UiVertex { pos: [x, y], uv: [u, v], color: self.pending_color });
    }
}
