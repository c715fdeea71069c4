//! Window Canvas
//!
//! Window creation, and the drawing surface that picks a GPU or software
//! backend for it.

use std::sync::Arc;

use tracing::{debug, warn};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

use super::canvas::{Canvas, Rect, Rgb, TextImage};
use super::font::TextBitmap;
use super::gpu::{GpuCanvas, GpuImage};
use super::software::SoftwareCanvas;
use crate::config::AppConfig;
use crate::error::Result;

/// Build the fixed-size, visible window, centered on the primary monitor
/// when one is known.
pub fn create_window(target: &EventLoopWindowTarget<()>, config: &AppConfig) -> Result<Window> {
    let size = LogicalSize::new(config.width, config.height);
    let mut builder = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(size)
        .with_resizable(false)
        .with_visible(true);

    if let Some(monitor) = target.primary_monitor() {
        let physical: PhysicalSize<u32> = size.to_physical(monitor.scale_factor());
        builder = builder.with_position(centered_position(
            monitor.position(),
            monitor.size(),
            physical,
        ));
    }

    let window = builder.build(target)?;
    debug!("Created window {:?}", window.inner_size());
    Ok(window)
}

/// Top-left position that centers a window of `window` size on a monitor
pub fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |outer: u32, inner: u32| ((i64::from(outer) - i64::from(inner)) / 2) as i32;
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor.width, window.width),
        monitor_origin.y + offset(monitor.height, window.height),
    )
}

/// Drawing surface bound to a window
///
/// Prefers the vsynced GPU swapchain and falls back to CPU presentation
/// when no adapter can drive the window.
pub enum WindowCanvas {
    Gpu(GpuCanvas),
    Software(SoftwareCanvas),
}

/// Image created by a [`WindowCanvas`], in the matching backend's memory
pub enum WindowImage {
    Gpu(GpuImage),
    Software(TextImage),
}

impl WindowCanvas {
    /// Bind a new drawing surface to `window`
    pub fn new(window: Arc<Window>) -> Result<Self> {
        match GpuCanvas::new(window.clone()) {
            Ok(gpu) => Ok(Self::Gpu(gpu)),
            Err(e) => {
                warn!("{}. Falling back to software rendering.", e);
                Ok(Self::Software(SoftwareCanvas::new(window)?))
            }
        }
    }

    /// Whether frames go through the GPU swapchain
    pub fn is_accelerated(&self) -> bool {
        matches!(self, Self::Gpu(_))
    }
}

impl Canvas for WindowCanvas {
    type Image = WindowImage;

    fn create_image(&mut self, bitmap: &TextBitmap) -> WindowImage {
        match self {
            Self::Gpu(gpu) => WindowImage::Gpu(gpu.create_image(bitmap)),
            Self::Software(soft) => WindowImage::Software(soft.create_image(bitmap)),
        }
    }

    fn image_size(&self, image: &WindowImage) -> (u32, u32) {
        match image {
            WindowImage::Gpu(image) => image.dimensions(),
            WindowImage::Software(image) => image.dimensions(),
        }
    }

    fn clear(&mut self, color: Rgb) {
        match self {
            Self::Gpu(gpu) => gpu.clear(color),
            Self::Software(soft) => soft.clear(color),
        }
    }

    fn copy(&mut self, image: &WindowImage, dst: Rect) {
        match (self, image) {
            (Self::Gpu(gpu), WindowImage::Gpu(image)) => gpu.copy(image, dst),
            (Self::Software(soft), WindowImage::Software(image)) => soft.copy(image, dst),
            _ => warn!("Image belongs to a different backend, not drawn"),
        }
    }

    fn present(&mut self) {
        match self {
            Self::Gpu(gpu) => gpu.present(),
            Self::Software(soft) => soft.present(),
        }
    }

    fn scale_factor(&self) -> f64 {
        match self {
            Self::Gpu(gpu) => gpu.scale_factor(),
            Self::Software(soft) => soft.scale_factor(),
        }
    }
}
