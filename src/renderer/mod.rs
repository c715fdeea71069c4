//! Renderer Module
//!
//! Text rasterization, the drawing-surface abstraction, and the window
//! canvas with its wgpu and softbuffer backends.

mod canvas;
mod font;
mod gpu;
mod software;
mod window;

pub use canvas::{Canvas, Framebuffer, Point, Rect, Rgb, Rgba, TextImage};
pub use font::{LoadedFont, TextBitmap, TextEngine};
pub use gpu::{GpuCanvas, GpuImage};
pub use software::SoftwareCanvas;
pub use window::{centered_position, create_window, WindowCanvas, WindowImage};
