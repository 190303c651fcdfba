/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from `0`–`255` channel bytes.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Returns the same color with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn packed(self) -> PackedColor {
        PackedColor::from(self)
    }
}

/// RGB triples are opaque.
impl From<[f32; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [f32; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<PackedColor> for Color {
    #[inline]
    fn from(c: PackedColor) -> Self {
        let [r, g, b, a] = c.to_bytes();
        Color::from_u8(r, g, b, a)
    }
}

/// Color packed as it travels in vertex data: R in the low byte, then G, B, A.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const WHITE: PackedColor = PackedColor::from_bytes(255, 255, 255, 255);

    #[inline]
    pub const fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same RGB with alpha forced to zero; used for anti-aliasing fringes.
    #[inline]
    pub const fn transparent(self) -> Self {
        Self(self.0 & 0x00ff_ffff)
    }
}

impl From<Color> for PackedColor {
    #[inline]
    fn from(c: Color) -> Self {
        PackedColor::from_bytes(unorm8(c.r), unorm8(c.g), unorm8(c.b), unorm8(c.a))
    }
}

#[inline]
fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_triple_is_opaque() {
        let c: Color = [0.2, 0.4, 0.6].into();
        assert_eq!(c.a, 1.0);
        assert_eq!(c.packed().alpha(), 255);
    }

    #[test]
    fn packing_puts_red_in_low_byte() {
        let p = PackedColor::from(Color::rgba(1.0, 0.0, 0.0, 0.0));
        assert_eq!(p.0, 0x0000_00ff);
        let p = PackedColor::from(Color::rgba(0.0, 0.0, 0.0, 1.0));
        assert_eq!(p.0, 0xff00_0000);
    }

    #[test]
    fn packing_saturates_out_of_range_channels() {
        let p = PackedColor::from(Color::rgba(2.0, -1.0, 0.5, 1.0));
        assert_eq!(p.to_bytes(), [255, 0, 128, 255]);
    }

    #[test]
    fn transparent_keeps_rgb() {
        let p = PackedColor::from_bytes(10, 20, 30, 200).transparent();
        assert_eq!(p.to_bytes(), [10, 20, 30, 0]);
    }
}
