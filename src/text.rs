//! Text measuring and drawing
//!
//! Tables never look inside glyphs; they go through the [`Typesetter`]
//! trait. [`FontBook`] is the real implementation (fontdue rasterization
//! with a glyph cache, fonts loaded by name from a directory).
//! [`BlockGlyphs`] draws every glyph as a solid cell and is used when no
//! fonts are available, and in tests where exact pixel positions matter.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

use crate::error::FontError;
use crate::style::TextStyle;
use crate::surface::Frame;

/// Measure-and-draw capability for single lines of text
pub trait Typesetter {
    /// Bounding box `(width, height)` of `text` set in `style`
    fn measure(&mut self, text: &str, style: &TextStyle) -> (i32, i32);

    /// Draw `text` with its bounding box's top-left corner at `(x, y)`
    fn draw(&mut self, frame: &mut Frame, x: i32, y: i32, text: &str, style: &TextStyle);
}

/// Placeholder glyphs: each character is a cell `size / 2` wide and `size`
/// tall; non-whitespace characters are drawn as a filled block one pixel
/// narrower than the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

impl BlockGlyphs {
    pub fn advance(size: u32) -> i32 {
        (size as i32 / 2).max(1)
    }
}

impl Typesetter for BlockGlyphs {
    fn measure(&mut self, text: &str, style: &TextStyle) -> (i32, i32) {
        let count = text.chars().count() as i32;
        (count * Self::advance(style.size), style.size as i32)
    }

    fn draw(&mut self, frame: &mut Frame, x: i32, y: i32, text: &str, style: &TextStyle) {
        let advance = Self::advance(style.size);
        let color = style.color.to_argb_u32();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cell = crate::geometry::Rect::new(
                x + i as i32 * advance,
                y,
                (advance - 1).max(1),
                style.size as i32,
            );
            frame.fill_rect(cell, color);
        }
    }
}

// Glyph cache key: (font index, character, font_size as bits)
type GlyphCacheKey = (usize, char, u32);
type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Fonts loaded by name, with a shared glyph cache
pub struct FontBook {
    fonts: Vec<Font>,
    names: HashMap<String, usize>,
    default_font: usize,
    glyph_cache: GlyphCache,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("fonts", &self.names.keys().collect::<Vec<_>>())
            .field("default_font", &self.default_font)
            .field("cached_glyphs", &self.glyph_cache.len())
            .finish()
    }
}

impl FontBook {
    /// Load every `.ttf`/`.otf` file in `dir`, keyed by file stem.
    ///
    /// The default font (used when a style names none, or names one that
    /// isn't loaded) is `default_name` if given and present, otherwise the
    /// alphabetically first font.
    pub fn load_dir(dir: &Path, default_name: Option<&str>) -> Result<Self, FontError> {
        let entries = std::fs::read_dir(dir).map_err(|source| FontError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"))
            })
            .collect();
        paths.sort();

        let mut fonts = Vec::new();
        for path in &paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(path).map_err(|source| FontError::Io {
                path: path.clone(),
                source,
            })?;
            let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|message| {
                FontError::Parse {
                    path: path.clone(),
                    message: message.to_string(),
                }
            })?;
            tracing::debug!("Loaded font {} from {}", name, path.display());
            fonts.push((name.to_string(), font));
        }

        Self::from_fonts(fonts, default_name).ok_or_else(|| FontError::NoFonts(dir.to_path_buf()))
    }

    /// Build from already-parsed fonts. Returns `None` if `fonts` is empty.
    pub fn from_fonts(named: Vec<(String, Font)>, default_name: Option<&str>) -> Option<Self> {
        if named.is_empty() {
            return None;
        }
        let mut fonts = Vec::with_capacity(named.len());
        let mut names = HashMap::new();
        for (name, font) in named {
            names.insert(name, fonts.len());
            fonts.push(font);
        }
        let default_font = default_name
            .and_then(|n| names.get(n).copied())
            .unwrap_or(0);
        Some(Self {
            fonts,
            names,
            default_font,
            glyph_cache: HashMap::new(),
        })
    }

    fn font_index(&self, name: Option<&str>) -> usize {
        match name {
            Some(name) => self.names.get(name).copied().unwrap_or_else(|| {
                tracing::debug!("Font {} not loaded, using default", name);
                self.default_font
            }),
            None => self.default_font,
        }
    }

    /// `(ascent, line height)` in pixels for a font at a size
    fn line_metrics(&self, index: usize, size: f32) -> (f32, i32) {
        match self.fonts[index].horizontal_line_metrics(size) {
            Some(m) => (m.ascent, m.new_line_size.ceil() as i32),
            None => (size, size.ceil() as i32),
        }
    }
}

impl Typesetter for FontBook {
    fn measure(&mut self, text: &str, style: &TextStyle) -> (i32, i32) {
        let index = self.font_index(style.font.as_deref());
        let size = style.size as f32;
        let (_, line_height) = self.line_metrics(index, size);

        let font = &self.fonts[index];
        let mut width = 0.0;
        for ch in text.chars() {
            let (metrics, _) = self
                .glyph_cache
                .entry((index, ch, size.to_bits()))
                .or_insert_with(|| font.rasterize(ch, size));
            width += metrics.advance_width;
        }
        (width.ceil() as i32, line_height)
    }

    fn draw(&mut self, frame: &mut Frame, x: i32, y: i32, text: &str, style: &TextStyle) {
        let index = self.font_index(style.font.as_deref());
        let size = style.size as f32;
        let (ascent, _) = self.line_metrics(index, size);
        let color = style.color.to_argb_u32();

        let font = &self.fonts[index];
        let mut current_x = x as f32;
        let baseline = y as f32 + ascent;

        for ch in text.chars() {
            let (metrics, bitmap) = self
                .glyph_cache
                .entry((index, ch, size.to_bits()))
                .or_insert_with(|| font.rasterize(ch, size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px >= 0 && py >= 0 {
                        frame.cover_pixel(px as usize, py as usize, color, alpha as f32 / 255.0);
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }
}

/// Fonts from `fonts_dir`, or [`BlockGlyphs`] if none can be loaded
pub fn load_typesetter(fonts_dir: Option<&Path>, default_font: Option<&str>) -> Box<dyn Typesetter> {
    let Some(dir) = fonts_dir else {
        tracing::warn!("No fonts directory configured, drawing placeholder glyphs");
        return Box::new(BlockGlyphs);
    };
    match FontBook::load_dir(dir, default_font) {
        Ok(book) => {
            tracing::info!("Loaded {} fonts from {}", book.fonts.len(), dir.display());
            Box::new(book)
        }
        Err(e) => {
            tracing::warn!("{}, drawing placeholder glyphs", e);
            Box::new(BlockGlyphs)
        }
    }
}
