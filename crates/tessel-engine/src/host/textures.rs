use std::collections::HashMap;

use tessel_bridge::host::{
    ImageBuffer, ImageDescription, ImageType, ResourceLocation, TextureFormat, TextureGroup, TextureHandle,
};

use crate::render::{RenderCtx, UiPipeline};

struct GpuTexture {
    // Kept alive for the bind group's view.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct TextureEntry {
    id: u64,
    image: ImageBuffer,
    gpu: Option<GpuTexture>,
}

/// Host texture group: CPU images keyed by location, mirrored to the GPU
/// lazily on the next [`sync`](Self::sync).
///
/// Every upload or forced reload assigns a fresh id, so handles taken earlier
/// stop resolving.
pub struct TextureStore {
    entries: HashMap<ResourceLocation, TextureEntry>,
    next_id: u64,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), next_id: 1 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, location: &ResourceLocation) -> bool {
        self.entries.contains_key(location)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Handle for `location`, or `None` if nothing was uploaded there.
    /// `force_reload` re-creates the GPU texture and issues a new id.
    pub fn handle(&mut self, location: &ResourceLocation, force_reload: bool) -> Option<TextureHandle> {
        if !self.entries.contains_key(location) {
            return None;
        }
        let fresh_id = if force_reload { Some(self.allocate_id()) } else { None };
        let entry = self.entries.get_mut(location)?;
        if let Some(id) = fresh_id {
            entry.id = id;
            entry.gpu = None;
        }
        Some(TextureHandle::new(entry.id, location.clone()))
    }

    /// Whether `handle` still names the live texture at its location.
    pub fn is_current(&self, handle: &TextureHandle) -> bool {
        self.entries
            .get(handle.location())
            .is_some_and(|e| e.id == handle.id())
    }

    /// Number of textures waiting for their GPU copy.
    pub fn pending_count(&self) -> usize {
        self.entries.values().filter(|e| e.gpu.is_none()).count()
    }

    pub fn bind_group(&self, handle: &TextureHandle) -> Option<&wgpu::BindGroup> {
        let entry = self.entries.get(handle.location())?;
        if entry.id != handle.id() {
            return None;
        }
        entry.gpu.as_ref().map(|g| &g.bind_group)
    }

    /// Creates GPU textures for every entry that lacks one.
    pub fn sync(&mut self, ctx: &RenderCtx<'_>, pipeline: &UiPipeline) {
        for (location, entry) in self.entries.iter_mut().filter(|(_, e)| e.gpu.is_none()) {
            match create_gpu_texture(ctx, pipeline, location, &entry.image) {
                Some(gpu) => {
                    log::debug!("texture {location} #{} resident on GPU", entry.id);
                    entry.gpu = Some(gpu);
                }
                None => log::warn!("texture {location} could not be created; draws using it are skipped"),
            }
        }
    }
}

impl TextureGroup for TextureStore {
    fn upload_texture(&mut self, location: &ResourceLocation, image: ImageBuffer) {
        let id = self.allocate_id();
        log::debug!(
            "texture {location} uploaded ({}x{}, {:?}) as #{id}",
            image.description.width,
            image.description.height,
            image.description.format
        );
        self.entries.insert(location.clone(), TextureEntry { id, image, gpu: None });
    }
}

fn wgpu_format(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
    }
}

/// Bytes of the first layer, or `None` if the blob is too short.
fn first_layer(image: &ImageBuffer) -> Option<&[u8]> {
    let desc = &image.description;
    let layer_len = desc.bytes_per_row() as usize * desc.height as usize;
    if desc.width == 0 || desc.height == 0 {
        return None;
    }
    image.pixels.get(..layer_len)
}

/// True when both sides fit in a 2D texture of the device.
fn fits_device(desc: &ImageDescription, max_dimension_2d: u32) -> bool {
    desc.width <= max_dimension_2d && desc.height <= max_dimension_2d
}

fn create_gpu_texture(
    ctx: &RenderCtx<'_>,
    pipeline: &UiPipeline,
    location: &ResourceLocation,
    image: &ImageBuffer,
) -> Option<GpuTexture> {
    let desc = image.description;
    if desc.image_type == ImageType::Texture2DArray {
        log::warn!("texture {location} is an array; only layer 0 is used");
    }
    let max_dim = ctx.device.limits().max_texture_dimension_2d;
    if !fits_device(&desc, max_dim) {
        log::warn!(
            "texture {location} is {}x{}, device limit is {max_dim}",
            desc.width,
            desc.height
        );
        return None;
    }
    let pixels = first_layer(image)?;
    let label = format!("tessel texture {location}");

    let size = wgpu::Extent3d { width: desc.width, height: desc.height, depth_or_array_layers: 1 };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu_format(desc.format),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(desc.bytes_per_row()),
            rows_per_image: Some(desc.height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = pipeline.create_texture_bind_group(ctx, &view, &label)?;
    Some(GpuTexture { _texture: texture, bind_group })
}
