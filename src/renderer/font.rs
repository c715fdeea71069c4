//! Font Rendering
//!
//! The text subsystem: loads a font file and rasterizes a string into an
//! offscreen RGBA bitmap sized to the text's natural dimensions.
//! Uses fontdue for glyph rasterization.

use std::path::Path;

use fontdue::{Font, FontSettings};
use tracing::debug;

use super::canvas::Rgba;
use crate::error::{Error, Result};

/// Offscreen RGBA bitmap (straight alpha, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBitmap {
    width: u32,
    height: u32,
    /// 4 bytes per pixel: R, G, B, A
    pixels: Vec<u8>,
}

impl TextBitmap {
    /// Create a fully transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the raw RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[idx..idx + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Composite a coverage mask in `color` with its top-left at (x, y).
    /// Parts of the mask outside the bitmap are dropped.
    pub(crate) fn blend_coverage(
        &mut self,
        coverage: &[u8],
        mask_width: usize,
        mask_height: usize,
        x: i32,
        y: i32,
        color: Rgba,
    ) {
        for my in 0..mask_height {
            let py = y as i64 + my as i64;
            if py < 0 || py >= i64::from(self.height) {
                continue;
            }

            for mx in 0..mask_width {
                let px = x as i64 + mx as i64;
                if px < 0 || px >= i64::from(self.width) {
                    continue;
                }

                let cov = u32::from(coverage.get(my * mask_width + mx).copied().unwrap_or(0));
                if cov == 0 {
                    continue;
                }

                let src_a = cov * u32::from(color.a) / 255;
                let idx = (py as usize * self.width as usize + px as usize) * 4;
                let dst_a = u32::from(self.pixels[idx + 3]);

                self.pixels[idx] = color.r;
                self.pixels[idx + 1] = color.g;
                self.pixels[idx + 2] = color.b;
                self.pixels[idx + 3] = (src_a + dst_a * (255 - src_a) / 255).min(255) as u8;
            }
        }
    }
}

/// A font opened at a fixed pixel size
pub struct LoadedFont {
    font: Font,
    size: f32,
    ascent: f32,
    descent: f32,
}

impl LoadedFont {
    /// Font size in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Height of one line of text: ascent minus descent, rounded up
    pub fn line_height(&self) -> u32 {
        (self.ascent - self.descent).ceil().max(0.0) as u32
    }

    /// Natural pixel dimensions of `text` rendered in this font
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let (_, advance) = self.pen_positions(text);
        (advance.ceil().max(0.0) as u32, self.line_height())
    }

    /// Pen x-position of every character plus the total advance
    fn pen_positions(&self, text: &str) -> (Vec<(char, f32)>, f32) {
        let mut positions = Vec::with_capacity(text.len());
        let mut pen = 0.0f32;
        let mut prev: Option<char> = None;

        for c in text.chars() {
            if let Some(p) = prev {
                pen += self.font.horizontal_kern(p, c, self.size).unwrap_or(0.0);
            }
            positions.push((c, pen));
            pen += self.font.metrics(c, self.size).advance_width;
            prev = Some(c);
        }

        (positions, pen)
    }
}

/// The text-rendering subsystem
pub struct TextEngine {
    settings: FontSettings,
}

impl TextEngine {
    /// Bring up the text subsystem
    pub fn new() -> Self {
        debug!("Text subsystem initialized");
        Self {
            settings: FontSettings::default(),
        }
    }

    /// Open the font file at `path` at `size` pixels
    pub fn open_font(&self, path: &Path, size: f32) -> Result<LoadedFont> {
        let data = std::fs::read(path).map_err(|source| Error::FontIo {
            path: path.to_path_buf(),
            source,
        })?;

        let font = self.load_font(&data, size)?;
        debug!("Loaded font {} at {}px", path.display(), size);
        Ok(font)
    }

    /// Parse font data at `size` pixels
    pub fn load_font(&self, data: &[u8], size: f32) -> Result<LoadedFont> {
        let settings = FontSettings {
            scale: size,
            ..self.settings
        };
        let font = Font::from_bytes(data, settings).map_err(|e| Error::FontParse(e.to_string()))?;

        let line_metrics = font
            .horizontal_line_metrics(size)
            .ok_or_else(|| Error::FontParse("No line metrics".to_string()))?;

        Ok(LoadedFont {
            font,
            size,
            ascent: line_metrics.ascent,
            descent: line_metrics.descent,
        })
    }

    /// Render `text` into a bitmap sized to its natural dimensions.
    ///
    /// Glyph coverage is alpha-blended in `color` over a transparent
    /// background, with the baseline at the font's ascent.
    pub fn render_blended(&self, font: &LoadedFont, text: &str, color: Rgba) -> TextBitmap {
        let (width, height) = font.measure(text);
        let mut bitmap = TextBitmap::new(width, height);
        let baseline = font.ascent.ceil();

        let (positions, _) = font.pen_positions(text);
        for (c, pen) in positions {
            let (metrics, coverage) = font.font.rasterize(c, font.size);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }

            let x = (pen + metrics.xmin as f32).round() as i32;
            let y = (baseline - metrics.ymin as f32 - metrics.height as f32) as i32;
            bitmap.blend_coverage(&coverage, metrics.width, metrics.height, x, y, color);
        }

        debug!("Rendered {:?} into {}x{} bitmap", text, width, height);
        bitmap
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextEngine {
    fn drop(&mut self) {
        debug!("Text subsystem shut down");
    }
}
