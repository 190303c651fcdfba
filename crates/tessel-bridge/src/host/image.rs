/// Pixel format of an uploaded image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, sRGB-encoded color channels.
    Rgba8UnormSrgb,
    /// 8-bit RGBA, linear.
    Rgba8Unorm,
}

impl TextureFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorSpace {
    Linear,
    Srgb,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ImageType {
    Texture2D,
    Texture2DArray,
}

/// Shape and encoding of an image handed to the host texture group.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ImageDescription {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub color_space: ColorSpace,
    pub image_type: ImageType,
    pub array_size: u32,
}

impl ImageDescription {
    /// Single-layer sRGB RGBA8 2D image.
    pub const fn srgb_rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::Rgba8UnormSrgb,
            color_space: ColorSpace::Srgb,
            image_type: ImageType::Texture2D,
            array_size: 1,
        }
    }

    /// Bytes per row of tightly packed pixel data.
    #[inline]
    pub const fn bytes_per_row(&self) -> u32 {
        self.width * self.format.bytes_per_pixel()
    }

    /// Expected length of the pixel blob.
    #[inline]
    pub const fn byte_len(&self) -> usize {
        self.bytes_per_row() as usize * self.height as usize * self.array_size as usize
    }
}

/// Pixel blob plus its description. Ownership moves to the host on upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub pixels: Vec<u8>,
    pub description: ImageDescription,
}

impl ImageBuffer {
    pub fn new(pixels: Vec<u8>, description: ImageDescription) -> Self {
        debug_assert_eq!(
            pixels.len(),
            description.byte_len(),
            "pixel blob does not match image description"
        );
        Self { pixels, description }
    }
}
