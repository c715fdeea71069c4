//! Software Canvas
//!
//! Presents a [`Framebuffer`] to a winit window through softbuffer. Used
//! when no GPU adapter can drive the window.

use std::num::NonZeroU32;
use std::sync::Arc;

use softbuffer::{Context, SoftBufferError, Surface};
use tracing::warn;
use winit::window::Window;

use super::canvas::{Canvas, Framebuffer, Rect, Rgb, TextImage};
use super::font::TextBitmap;
use crate::error::Result;

/// CPU drawing surface bound to a window
pub struct SoftwareCanvas {
    _context: Context<Arc<Window>>,
    surface: Surface<Arc<Window>, Arc<Window>>,
    /// Back buffer in physical pixels, copied to the surface on present
    back: Framebuffer,
    window: Arc<Window>,
}

impl SoftwareCanvas {
    /// Bind a new drawing surface to `window`
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;
        let size = window.inner_size();

        Ok(Self {
            _context: context,
            surface,
            back: Framebuffer::new(size.width, size.height),
            window,
        })
    }

    fn present_frame(&mut self) -> std::result::Result<(), SoftBufferError> {
        let (width, height) = self.back.dimensions();
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };

        self.surface.resize(w, h)?;
        let mut buffer = self.surface.buffer_mut()?;
        let len = buffer.len().min(self.back.pixels().len());
        buffer[..len].copy_from_slice(&self.back.pixels()[..len]);
        buffer.present()
    }
}

impl Canvas for SoftwareCanvas {
    type Image = TextImage;

    fn create_image(&mut self, bitmap: &TextBitmap) -> TextImage {
        TextImage::from_bitmap(bitmap)
    }

    fn image_size(&self, image: &TextImage) -> (u32, u32) {
        image.dimensions()
    }

    fn clear(&mut self, color: Rgb) {
        let size = self.window.inner_size();
        self.back.resize(size.width, size.height);
        self.back.fill(color);
    }

    fn copy(&mut self, image: &TextImage, dst: Rect) {
        self.back.blit(image, dst);
    }

    fn present(&mut self) {
        if let Err(e) = self.present_frame() {
            warn!("Failed to present frame: {}", e);
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }
}
