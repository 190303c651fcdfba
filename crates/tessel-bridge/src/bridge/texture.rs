use crate::host::{ImageBuffer, ImageDescription, RenderContext, ResourceLocation, TextureFormat, TextureHandle, TextureGroup};
use crate::ui::{FontAtlasSource, TexData, TextureId};

/// The font atlas as it lives on the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FontTexture {
    handle: TextureHandle,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl FontTexture {
    #[inline]
    pub fn handle(&self) -> &TextureHandle {
        &self.handle
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> TextureFormat {
        self.format
    }
}

/// Keeps exactly one font texture resident on the host.
///
/// The texture is created on first use and re-created after
/// [`mark_unloaded`](Self::mark_unloaded); a stale handle is never returned.
#[derive(Debug)]
pub struct FontTextureManager {
    location: ResourceLocation,
    texture: Option<FontTexture>,
    unloaded: bool,
    upload_count: u64,
}

impl FontTextureManager {
    pub fn new(location: ResourceLocation) -> Self {
        Self { location, texture: None, unloaded: false, upload_count: 0 }
    }

    #[inline]
    pub fn location(&self) -> &ResourceLocation {
        &self.location
    }

    /// True when a texture exists and has not been invalidated.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.texture.is_some() && !self.unloaded
    }

    /// The current texture, valid or not.
    #[inline]
    pub fn texture(&self) -> Option<&FontTexture> {
        self.texture.as_ref()
    }

    /// Number of uploads performed so far.
    #[inline]
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }

    /// Invalidates the texture; the next [`ensure_font_texture`] uploads it
    /// again. Host resources are left alone, the re-upload replaces them.
    ///
    /// [`ensure_font_texture`]: Self::ensure_font_texture
    pub fn mark_unloaded(&mut self) {
        if !self.unloaded {
            log::debug!("font texture {} marked unloaded", self.location);
        }
        self.unloaded = true;
    }

    /// Returns the resident texture, uploading the atlas first when there is
    /// none or it was invalidated. Publishes the handle id to the atlas.
    pub fn ensure_font_texture<C: RenderContext>(
        &mut self,
        atlas: &mut impl FontAtlasSource,
        ctx: &mut C,
    ) -> &FontTexture {
        let texture = match self.texture.take() {
            Some(texture) if !self.unloaded => texture,
            _ => self.upload(atlas, ctx),
        };
        self.unloaded = false;
        self.texture.insert(texture)
    }

    fn upload<C: RenderContext>(&mut self, atlas: &mut impl FontAtlasSource, ctx: &mut C) -> FontTexture {
        let TexData { pixels, width, height } = atlas.tex_data_as_rgba32();
        let description = ImageDescription::srgb_rgba8(width, height);
        let image = ImageBuffer::new(pixels.to_vec(), description);

        ctx.texture_group().upload_texture(&self.location, image);
        let handle = ctx.get_texture(&self.location, false);
        atlas.set_tex_id(TextureId(handle.id()));

        self.upload_count += 1;
        log::debug!(
            "uploaded font texture {} ({width}x{height}, handle {})",
            self.location,
            handle.id()
        );

        FontTexture { handle, width, height, format: description.format }
    }
}
