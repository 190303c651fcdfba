use std::collections::HashMap;
use std::fmt;

use crate::coords::Vec2;

use super::TextureId;

#[derive(Debug)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font baked into a [`FontAtlas`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Pixels between packed rects.
const PADDING: u32 = 1;
/// Side of the opaque white block used by untextured shapes.
const WHITE_SIZE: u32 = 2;
const MIN_WIDTH: u32 = 512;
const MAX_WIDTH: u32 = 4096;
const MAX_HEIGHT: u32 = 4096;
/// Largest accepted bake size. Printable ASCII at this size fits the
/// maximum atlas.
const MAX_SIZE_PX: f32 = 512.0;
const FALLBACK_CHAR: char = '?';

/// Baked glyph. Offsets are relative to the pen at the top of the line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub advance_x: f32,
    pub p0: Vec2,
    pub p1: Vec2,
    pub uv0: Vec2,
    pub uv1: Vec2,
    /// False for glyphs without coverage (space).
    pub visible: bool,
}

/// One font rasterized at one pixel size.
#[derive(Debug, Clone)]
pub struct BakedFont {
    size_px: f32,
    line_height: f32,
    glyphs: HashMap<char, Glyph>,
}

impl BakedFont {
    #[inline]
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Glyph for `ch`, or the fallback glyph when `ch` was not baked.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&FALLBACK_CHAR))
    }
}

/// Borrowed RGBA32 atlas pixels.
#[derive(Debug, Copy, Clone)]
pub struct TexData<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Row-by-row rect packer over a fixed width and bounded height.
#[derive(Debug)]
struct ShelfPacker {
    width: u32,
    max_height: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    fn new(width: u32, max_height: u32) -> Self {
        Self { width, max_height, cursor_x: PADDING, cursor_y: PADDING, row_height: 0 }
    }

    /// Top-left corner for a `w`x`h` rect, or `None` when it no longer fits.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * PADDING > self.width {
            return None;
        }
        let (mut x, mut y, mut row) = (self.cursor_x, self.cursor_y, self.row_height);
        if x + w + PADDING > self.width {
            y += row + PADDING;
            x = PADDING;
            row = 0;
        }
        if y + h + PADDING > self.max_height {
            return None;
        }
        self.cursor_x = x + w + PADDING;
        self.cursor_y = y;
        self.row_height = row.max(h);
        Some((x, y))
    }

    /// Height covering every placed rect plus trailing padding.
    fn used_height(&self) -> u32 {
        self.cursor_y + self.row_height + PADDING
    }
}

/// What the bridge needs from the toolkit's font system.
pub trait FontAtlasSource {
    /// Atlas pixels as tightly packed RGBA8, building the atlas if needed.
    fn tex_data_as_rgba32(&mut self) -> TexData<'_>;

    /// Publishes the texture id later draw commands will reference.
    fn set_tex_id(&mut self, id: TextureId);
}

struct FontSource {
    font: fontdue::Font,
    size_px: f32,
}

struct Raster {
    font: usize,
    ch: char,
    metrics: fontdue::Metrics,
    bitmap: Vec<u8>,
    /// Atlas position; `None` for empty or unplaced bitmaps.
    at: Option<(u32, u32)>,
}

/// Font atlas: every added font rasterized at its size into one RGBA32
/// texture, plus a white block for untextured shapes.
///
/// Pixels are white with the glyph coverage in alpha. Only printable ASCII
/// is baked.
pub struct FontAtlas {
    sources: Vec<FontSource>,
    fonts: Vec<BakedFont>,

    pixels: Vec<u8>,
    width: u32,
    height: u32,
    white_uv: Vec2,

    tex_id: TextureId,
    dirty: bool,
}

impl Default for FontAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl FontAtlas {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            fonts: Vec::new(),
            pixels: Vec::new(),
            width: 0,
            height: 0,
            white_uv: Vec2::zero(),
            tex_id: TextureId::NONE,
            dirty: true,
        }
    }

    /// Parses a TTF/OTF font and queues it for baking at `size_px`.
    pub fn add_font_from_bytes(&mut self, bytes: &[u8], size_px: f32) -> Result<FontId, FontLoadError> {
        if !(size_px > 0.0 && size_px.is_finite()) {
            return Err(FontLoadError(format!("invalid pixel size {size_px}")));
        }
        if size_px > MAX_SIZE_PX {
            return Err(FontLoadError(format!("pixel size {size_px} exceeds {MAX_SIZE_PX}")));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.sources.len());
        self.sources.push(FontSource { font, size_px });
        self.dirty = true;
        Ok(id)
    }

    /// True when fonts were added since the last build.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn font(&self, id: FontId) -> Option<&BakedFont> {
        self.fonts.get(id.0)
    }

    #[inline]
    pub fn font_count(&self) -> usize {
        self.sources.len()
    }

    /// UV of the center of the white block.
    #[inline]
    pub fn white_uv(&self) -> Vec2 {
        self.white_uv
    }

    #[inline]
    pub fn tex_id(&self) -> TextureId {
        self.tex_id
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rasterizes and packs everything. No-op when nothing changed.
    pub fn build(&mut self) {
        if !self.dirty {
            return;
        }

        let mut rasters = Vec::new();
        for (font_idx, src) in self.sources.iter().enumerate() {
            for ch in (' '..='~').filter(|&c| c == ' ' || src.font.lookup_glyph_index(c) != 0) {
                let (metrics, bitmap) = src.font.rasterize(ch, src.size_px);
                rasters.push(Raster { font: font_idx, ch, metrics, bitmap, at: None });
            }
        }

        let area: u32 = rasters
            .iter()
            .map(|r| (r.metrics.width as u32 + PADDING) * (r.metrics.height as u32 + PADDING))
            .sum::<u32>()
            + (WHITE_SIZE + PADDING) * (WHITE_SIZE + PADDING);
        let mut width = MIN_WIDTH;
        while width < MAX_WIDTH && area > width * width / 2 {
            width *= 2;
        }

        // Shelf packing, tallest first so rows waste less.
        rasters.sort_by(|a, b| b.metrics.height.cmp(&a.metrics.height));
        let mut packer = ShelfPacker::new(width, MAX_HEIGHT);
        let white = packer.place(WHITE_SIZE, WHITE_SIZE).unwrap_or((PADDING, PADDING));
        let mut dropped = 0;
        for r in rasters.iter_mut().filter(|r| r.metrics.width > 0 && r.metrics.height > 0) {
            r.at = packer.place(r.metrics.width as u32, r.metrics.height as u32);
            if r.at.is_none() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("font atlas full at {width}x{MAX_HEIGHT}: {dropped} glyphs left out");
        }
        let height = packer.used_height().next_power_of_two();

        // White RGB everywhere; coverage goes to alpha.
        let mut pixels = [255u8, 255, 255, 0].repeat((width * height) as usize);
        let mut set_alpha = |x: u32, y: u32, a: u8| {
            pixels[((y * width + x) * 4 + 3) as usize] = a;
        };
        for y in 0..WHITE_SIZE {
            for x in 0..WHITE_SIZE {
                set_alpha(white.0 + x, white.1 + y, 255);
            }
        }
        for r in &rasters {
            let Some((rx, ry)) = r.at else { continue };
            let w = r.metrics.width;
            for (i, &a) in r.bitmap.iter().enumerate() {
                set_alpha(rx + (i % w) as u32, ry + (i / w) as u32, a);
            }
        }

        let (tw, th) = (width as f32, height as f32);
        self.fonts = self
            .sources
            .iter()
            .map(|src| {
                let line = src.font.horizontal_line_metrics(src.size_px);
                BakedFont {
                    size_px: src.size_px,
                    line_height: line.map_or(src.size_px, |l| l.new_line_size),
                    glyphs: HashMap::new(),
                }
            })
            .collect();
        for r in &rasters {
            let visible = r.metrics.width > 0 && r.metrics.height > 0;
            let (rx, ry) = match r.at {
                Some(at) => at,
                None if visible => continue,
                None => (0, 0),
            };
            let src = &self.sources[r.font];
            let ascent = src
                .font
                .horizontal_line_metrics(src.size_px)
                .map_or(src.size_px, |l| l.ascent);
            let m = &r.metrics;
            let p0 = Vec2::new(m.xmin as f32, ascent - (m.ymin + m.height as i32) as f32);
            let p1 = p0 + Vec2::new(m.width as f32, m.height as f32);
            let glyph = Glyph {
                advance_x: m.advance_width,
                p0,
                p1,
                uv0: Vec2::new(rx as f32 / tw, ry as f32 / th),
                uv1: Vec2::new((rx + m.width as u32) as f32 / tw, (ry + m.height as u32) as f32 / th),
                visible,
            };
            self.fonts[r.font].glyphs.insert(r.ch, glyph);
        }

        self.white_uv = Vec2::new(
            (white.0 as f32 + WHITE_SIZE as f32 * 0.5) / tw,
            (white.1 as f32 + WHITE_SIZE as f32 * 0.5) / th,
        );
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        self.dirty = false;

        log::debug!(
            "font atlas built: {width}x{height}, {} fonts, {} glyphs",
            self.fonts.len(),
            rasters.len()
        );
    }
}

#[cfg(test)]
impl BakedFont {
    pub(crate) fn from_glyphs(size_px: f32, line_height: f32, glyphs: impl IntoIterator<Item = (char, Glyph)>) -> Self {
        Self { size_px, line_height, glyphs: glyphs.into_iter().collect() }
    }
}

#[cfg(test)]
impl FontAtlas {
    /// Builds the atlas and appends a hand-made font to it.
    pub(crate) fn insert_baked(&mut self, font: BakedFont) -> FontId {
        self.build();
        self.fonts.push(font);
        FontId(self.fonts.len() - 1)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl FontAtlasSource for FontAtlas {
    fn tex_data_as_rgba32(&mut self) -> TexData<'_> {
        self.build();
        TexData { pixels: &self.pixels, width: self.width, height: self.height }
    }

    fn set_tex_id(&mut self, id: TextureId) {
        self.tex_id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at_uv(data: &TexData<'_>, uv: Vec2) -> u8 {
        let x = (uv.x * data.width as f32) as u32;
        let y = (uv.y * data.height as f32) as u32;
        data.pixels[((y * data.width + x) * 4 + 3) as usize]
    }

    #[test]
    fn empty_atlas_still_has_white_block() {
        let mut atlas = FontAtlas::new();
        assert!(atlas.is_dirty());

        let data = atlas.tex_data_as_rgba32();
        assert_eq!(data.width, MIN_WIDTH);
        assert!(data.height.is_power_of_two());
        assert_eq!(data.pixels.len(), (data.width * data.height * 4) as usize);
        let uv = atlas.white_uv();
        let data = atlas.tex_data_as_rgba32();
        assert_eq!(alpha_at_uv(&data, uv), 255);
        assert!(!atlas.is_dirty());
    }

    #[test]
    fn white_block_is_opaque_white_and_background_is_clear() {
        let mut atlas = FontAtlas::new();
        let data = atlas.tex_data_as_rgba32();
        let first = &data.pixels[..4];
        assert_eq!(first, &[255, 255, 255, 0]);
        let white = ((PADDING * data.width + PADDING) * 4) as usize;
        assert_eq!(&data.pixels[white..white + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let mut atlas = FontAtlas::new();
        atlas.build();
        let err = atlas.add_font_from_bytes(b"not a font", 16.0);
        assert!(err.is_err());
        assert!(err.err().is_some_and(|e| e.to_string().starts_with("font load error")));
        assert_eq!(atlas.font_count(), 0);
        assert!(!atlas.is_dirty());
    }

    #[test]
    fn invalid_size_is_rejected() {
        let mut atlas = FontAtlas::new();
        assert!(atlas.add_font_from_bytes(&[], 0.0).is_err());
        assert!(atlas.add_font_from_bytes(&[], f32::NAN).is_err());
    }

    #[test]
    fn tex_id_slot_round_trips() {
        let mut atlas = FontAtlas::new();
        assert_eq!(atlas.tex_id(), TextureId::NONE);
        atlas.set_tex_id(TextureId(42));
        assert_eq!(atlas.tex_id(), TextureId(42));
    }

    #[test]
    fn unknown_font_id_has_no_glyphs() {
        let mut atlas = FontAtlas::new();
        atlas.build();
        assert!(atlas.font(FontId(0)).is_none());
    }

    #[test]
    fn oversized_bake_size_is_rejected_before_parsing() {
        let mut atlas = FontAtlas::new();
        atlas.build();
        let err = atlas.add_font_from_bytes(&[], 3000.0).err();
        assert!(err.is_some_and(|e| e.to_string().contains("exceeds")));
        assert!(!atlas.is_dirty());
    }

    #[test]
    fn shelf_packer_wraps_rows_below_the_tallest_rect() {
        let mut packer = ShelfPacker::new(32, 64);
        assert_eq!(packer.place(10, 12), Some((1, 1)));
        assert_eq!(packer.place(10, 4), Some((12, 1)));
        // 23 + 10 + 1 > 32: next row starts under the 12px rect.
        assert_eq!(packer.place(10, 4), Some((1, 14)));
        assert_eq!(packer.used_height(), 14 + 4 + 1);
    }

    #[test]
    fn shelf_packer_refuses_rects_past_the_bounds() {
        let mut packer = ShelfPacker::new(32, 16);
        assert_eq!(packer.place(31, 2), None);
        assert_eq!(packer.place(30, 10), Some((1, 1)));
        assert_eq!(packer.place(30, 10), None);
        // A refused rect leaves the cursor alone.
        assert_eq!(packer.place(30, 3), Some((1, 12)));
        assert!(packer.used_height() <= 16);
    }

    fn glyph(advance_x: f32) -> Glyph {
        Glyph {
            advance_x,
            p0: Vec2::zero(),
            p1: Vec2::splat(1.0),
            uv0: Vec2::zero(),
            uv1: Vec2::splat(0.5),
            visible: true,
        }
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let font = BakedFont::from_glyphs(16.0, 20.0, [('A', glyph(9.0)), ('?', glyph(7.0))]);
        assert_eq!(font.glyph('A').map(|g| g.advance_x), Some(9.0));
        assert_eq!(font.glyph('é').map(|g| g.advance_x), Some(7.0));

        let bare = BakedFont::from_glyphs(16.0, 20.0, [('A', glyph(9.0))]);
        assert!(bare.glyph('é').is_none());
    }

    #[test]
    fn inserted_font_is_reachable_by_id() {
        let mut atlas = FontAtlas::new();
        let id = atlas.insert_baked(BakedFont::from_glyphs(13.0, 15.0, [('x', glyph(6.0))]));
        assert!(!atlas.is_dirty());
        assert_eq!(atlas.font(id).map(BakedFont::line_height), Some(15.0));
    }
}
