use bytemuck::{Pod, Zeroable};
use tessel_bridge::coords::Rect;

use super::Viewport;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha over.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    pub(super) fn min_binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<Self>() as u64)
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a clip rect in GUI units to a physical scissor `(x, y, w, h)`,
/// clamped to the viewport.
///
/// `None` means no clipping and yields the full viewport. A clip that ends up
/// zero-area yields `None`; the draw should be skipped.
pub(crate) fn clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.width * scale).max(1.0) as u32;
    let phys_h = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_w, phys_h),
        Some(r) => {
            let r = r.normalized();
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_w);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_h);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0).ceil() as u32).min(phys_w);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0).ceil() as u32).min(phys_h);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
