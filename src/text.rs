//! Font loading and text rendering.

use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, TextStyle};
use hashbrown::HashMap;

use crate::graphics::{Color, Surface};

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

const DEFAULT_FONTS: &[&str] = &["DejaVuSans", "LiberationSans-Regular", "Arial", "arial", "Helvetica"];

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct FontKey {
    name: Option<String>,
    size: u32,
}

/// A loaded font at a fixed pixel size.
pub struct Font {
    inner: fontdue::Font,
    size: f32,
}

impl Font {
    /// Creates a new font from TrueType/OpenType data.
    pub fn new(data: impl AsRef<[u8]>, size: f32) -> anyhow::Result<Self> {
        let inner = fontdue::Font::from_bytes(data.as_ref(), fontdue::FontSettings::default())
            .map_err(anyhow::Error::msg)?;
        Ok(Self { inner, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Fonts keyed by name and size, created on first use and kept for the
/// lifetime of the owning window.
///
/// A font that fails to load is remembered as missing, so the failure is
/// logged once and text drawn with it is skipped.
pub struct FontCache {
    fonts: HashMap<FontKey, Option<Font>>,
    layout: Layout,
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCache {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Number of cached entries, including fonts that failed to load.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns the font for `name` at `size` pixels, loading it if needed.
    pub fn get(&mut self, name: Option<&str>, size: u32) -> Option<&Font> {
        let key = FontKey {
            name: name.map(str::to_owned),
            size,
        };
        self.fonts
            .entry(key)
            .or_insert_with(|| match load_font(name, size as f32) {
                Ok(font) => {
                    log::debug!("loaded font {:?} at {}px", name, size);
                    Some(font)
                }
                Err(e) => {
                    log::warn!("{:#}", e);
                    None
                }
            })
            .as_ref()
    }

    /// Renders `text` into a new surface sized to fit it.
    pub fn render(&mut self, text: &str, name: Option<&str>, size: u32, color: Color) -> Option<Surface> {
        self.get(name, size)?;
        let font = self
            .fonts
            .get(&FontKey {
                name: name.map(str::to_owned),
                size,
            })?
            .as_ref()?;
        Some(render_with(&mut self.layout, font, text, color))
    }
}

/// Lays out and rasterizes `text` with `font`.
pub fn render_with(layout: &mut Layout, font: &Font, text: &str, color: Color) -> Surface {
    layout.clear();
    layout.append(
        std::slice::from_ref(&font.inner),
        &TextStyle::new(text, font.size, 0),
    );

    let width = layout
        .glyphs()
        .iter()
        .map(|g| (g.x + g.width as f32).ceil() as i32)
        .max()
        .unwrap_or(0)
        .max(0) as u32;
    let height = layout.height().ceil().max(0.) as u32;

    let mut surface = Surface::new(width, height);
    for glyph in layout.glyphs() {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.inner.rasterize_config(glyph.key);
        let (gx, gy) = (glyph.x.round() as i32, glyph.y.round() as i32);
        for (i, &c) in coverage.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let x = gx + (i % metrics.width) as i32;
            let y = gy + (i / metrics.width) as i32;
            let a = (c as u32 * color.a as u32 / 255) as u8;
            surface.put_pixel(x, y, color.with_alpha_byte(a));
        }
    }
    surface
}

fn load_font(name: Option<&str>, size: f32) -> anyhow::Result<Font> {
    let path = resolve(name).ok_or_else(|| match name {
        Some(name) => anyhow::anyhow!("font '{}' not found", name),
        None => anyhow::anyhow!("no default font found"),
    })?;
    let data = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("failed to read font '{}': {}", path.display(), e))?;
    Font::new(data, size).map_err(|e| anyhow::anyhow!("invalid font '{}': {}", path.display(), e))
}

fn resolve(name: Option<&str>) -> Option<PathBuf> {
    match name {
        Some(name) if Path::new(name).is_file() => Some(PathBuf::from(name)),
        Some(name) => find_in_font_dirs(name),
        None => DEFAULT_FONTS.iter().find_map(|name| find_in_font_dirs(name)),
    }
}

fn find_in_font_dirs(name: &str) -> Option<PathBuf> {
    FONT_DIRS.iter().find_map(|dir| {
        ["ttf", "otf", "ttc"]
            .iter()
            .map(|ext| Path::new(dir).join(format!("{}.{}", name, ext)))
            .find(|p| p.is_file())
    })
}
