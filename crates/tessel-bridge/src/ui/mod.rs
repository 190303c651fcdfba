//! Immediate-mode UI toolkit model.
//!
//! This is the producer side of the bridge: widgets append geometry to
//! [`DrawList`]s during a frame, and [`UiContext::render`] hands the finished
//! lists over as [`DrawData`]. Geometry is a shared vertex/index buffer per
//! list, split into [`DrawCmd`]s whenever the clip rect changes.
//!
//! Conventions:
//! - positions are in toolkit pixels (top-left origin, +Y down)
//! - untextured shapes sample the atlas' white texel
//! - colors are packed straight-alpha RGBA (`PackedColor`)

mod context;
mod draw_data;
mod draw_list;
mod flags;
mod font_atlas;

pub use context::{DrawListSharedData, Io, Style, UiContext};
pub use draw_data::{DrawCmd, DrawCmdList, DrawData, DrawIdx, DrawVert, TextureId};
pub use draw_list::DrawList;
pub use flags::DrawFlags;
pub use font_atlas::{BakedFont, FontAtlas, FontAtlasSource, FontId, FontLoadError, Glyph, TexData};
