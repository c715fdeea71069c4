//! Drawing Surface
//!
//! The [`Canvas`] trait is the seam between the frame cycle and whatever
//! actually shows pixels. [`Framebuffer`] is the CPU implementation: a
//! `0x00RRGGBB` pixel buffer, the same layout softbuffer presents.

use super::font::TextBitmap;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into a `0x00RRGGBB` pixel
    pub const fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// RGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Pixel position, may lie outside the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a logical position to physical pixels
    pub fn scaled(self, scale_factor: f64) -> Self {
        let scale = |v: i32| (f64::from(v) * scale_factor).round() as i32;
        Self::new(scale(self.x), scale(self.y))
    }
}

/// Destination rectangle for a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at `origin` with the given size
    pub const fn at(origin: Point, (width, height): (u32, u32)) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Whether the pixel at (x, y) lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }
}

/// A surface the frame cycle can draw to
///
/// Images are created from a canvas and are only meaningful to the canvas
/// that created them.
pub trait Canvas {
    /// Renderable image type produced by this canvas
    type Image;

    /// Convert an offscreen bitmap into a renderable image
    fn create_image(&mut self, bitmap: &TextBitmap) -> Self::Image;

    /// Pixel dimensions of an image as (width, height)
    fn image_size(&self, image: &Self::Image) -> (u32, u32);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Rgb);

    /// Draw `image` scaled into `dst`, blending by its alpha
    fn copy(&mut self, image: &Self::Image, dst: Rect);

    /// Show the completed frame
    fn present(&mut self);

    /// Physical pixels per logical pixel. Draw positions are given to
    /// [`Canvas::copy`] in physical pixels.
    fn scale_factor(&self) -> f64 {
        1.0
    }
}

/// Renderable image: packed `0xAARRGGBB` pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl TextImage {
    /// Convert an RGBA bitmap, keeping its dimensions
    pub fn from_bitmap(bitmap: &TextBitmap) -> Self {
        let pixels = bitmap
            .pixels()
            .chunks_exact(4)
            .map(|p| {
                (u32::from(p[3]) << 24)
                    | (u32::from(p[0]) << 16)
                    | (u32::from(p[1]) << 8)
                    | u32::from(p[2])
            })
            .collect();

        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            pixels,
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

    /// Get the packed pixels
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// CPU pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Pixel buffer (0x00RRGGBB)
    pixels: Vec<u32>,
    /// Buffer width
    width: u32,
    /// Buffer height
    height: u32,
    /// Number of frames presented
    presented: u64,
}

impl Framebuffer {
    /// Create a black framebuffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
            presented: 0,
        }
    }

    /// Resize the buffer, discarding its contents
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, 0);
    }

    /// Fill the buffer with a color
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_pixel());
    }

    /// Alpha-blend `image` into `dst`, nearest-neighbour scaled and clipped
    pub fn blit(&mut self, image: &TextImage, dst: Rect) {
        if dst.width == 0 || dst.height == 0 || image.width == 0 || image.height == 0 {
            return;
        }

        let x0 = i64::from(dst.x).max(0);
        let y0 = i64::from(dst.y).max(0);
        let x1 = (i64::from(dst.x) + i64::from(dst.width)).min(i64::from(self.width));
        let y1 = (i64::from(dst.y) + i64::from(dst.height)).min(i64::from(self.height));

        for py in y0..y1 {
            let sy = ((py - i64::from(dst.y)) * i64::from(image.height) / i64::from(dst.height))
                as usize;
            let src_row = sy * image.width as usize;
            let dst_row = py as usize * self.width as usize;

            for px in x0..x1 {
                let sx = ((px - i64::from(dst.x)) * i64::from(image.width)
                    / i64::from(dst.width)) as usize;
                let src = image.pixels[src_row + sx];
                let idx = dst_row + px as usize;
                self.pixels[idx] = blend(src, self.pixels[idx]);
            }
        }
    }

    /// Get the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Get the pixel buffer
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Get buffer dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Canvas for Framebuffer {
    type Image = TextImage;

    fn create_image(&mut self, bitmap: &TextBitmap) -> TextImage {
        TextImage::from_bitmap(bitmap)
    }

    fn image_size(&self, image: &TextImage) -> (u32, u32) {
        image.dimensions()
    }

    fn clear(&mut self, color: Rgb) {
        self.fill(color);
    }

    fn copy(&mut self, image: &TextImage, dst: Rect) {
        self.blit(image, dst);
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Source-over blend of a `0xAARRGGBB` pixel onto an opaque `0x00RRGGBB` one
fn blend(src: u32, dst: u32) -> u32 {
    let a = src >> 24;
    match a {
        0 => dst,
        255 => src & 0x00FF_FFFF,
        _ => {
            let inv = 255 - a;
            let channel = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let d = (dst >> shift) & 0xFF;
                ((s * a + d * inv + 127) / 255) << shift
            };
            channel(16) | channel(8) | channel(0)
        }
    }
}
