//! Host-engine interfaces consumed by the bridge.
//!
//! The bridge never talks to a GPU API directly. A host engine exposes an
//! immediate mesh builder ([`Tessellator`]), a texture group keyed by
//! [`ResourceLocation`], and a render context that flushes the built mesh with
//! a named material and texture. `tessel-engine` provides a wgpu host.

mod context;
mod image;
mod resource;

#[cfg(test)]
pub(crate) mod recording;

pub use context::{GuiMetrics, PrimitiveMode, RenderContext, Tessellator, TextureGroup};
pub use image::{ColorSpace, ImageBuffer, ImageDescription, ImageType, TextureFormat};
pub use resource::{MaterialId, ResourceLocation, TextureHandle};
