//! Application State
//!
//! [`App`] owns the window, the drawing surface, the rendered label and the
//! text subsystem. The runner drives [`App::frame`] until it returns
//! [`Flow::Exit`]; the first frame that sees the running flag cleared also
//! releases every resource.

pub mod input;
mod runner;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::renderer::{Canvas, Rect, TextBitmap, TextEngine};

pub use input::{EventQueue, Input, Key};
pub use runner::{launch, render_label, Pacing};

/// What the driver should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The application record
///
/// `W` is the window handle, `C` the drawing surface bound to it and `T`
/// the text subsystem. The label is always an image created by the canvas
/// held in `canvas` and is released before it.
pub struct App<W, C: Canvas, T = TextEngine> {
    config: AppConfig,
    text: Option<T>,
    window: Option<W>,
    canvas: Option<C>,
    label: Option<C::Image>,
    running: bool,
    shut_down: bool,
    frames: u64,
}

impl<W, C: Canvas, T> App<W, C, T> {
    /// Assemble the application from acquired resources. `label` is
    /// converted to an image on `canvas` and can be dropped afterwards.
    pub fn new(
        config: AppConfig,
        text: T,
        window: W,
        mut canvas: C,
        label: &TextBitmap,
    ) -> Self {
        let image = canvas.create_image(label);
        debug!("Label image {}x{}", label.width(), label.height());

        Self {
            config,
            text: Some(text),
            window: Some(window),
            canvas: Some(canvas),
            label: Some(image),
            running: true,
            shut_down: false,
            frames: 0,
        }
    }

    /// Draw the label once, before the first frame
    pub fn draw_initial(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            if let Some(label) = &self.label {
                let dst = label_rect(&self.config, canvas, label);
                canvas.copy(label, dst);
            }
        }
    }

    /// Run one frame cycle: drain input, clear, draw the label, present.
    ///
    /// When an input asked to stop, resources are released before
    /// returning [`Flow::Exit`]. After shutdown this does nothing.
    pub fn frame(&mut self, events: &mut EventQueue) -> Flow {
        if self.shut_down {
            return Flow::Exit;
        }

        for input in events.drain() {
            if input.requests_exit() {
                info!("Exit requested: {:?}", input);
                self.running = false;
            }
        }

        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear(self.config.clear_color);

            if let Some(label) = &self.label {
                let dst = label_rect(&self.config, canvas, label);
                canvas.copy(label, dst);
            }

            canvas.present();
        }
        self.frames += 1;

        if self.running {
            Flow::Continue
        } else {
            self.shutdown();
            Flow::Exit
        }
    }

    /// Clear the running flag; the next frame shuts down
    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// Release the label, surface, window and text subsystem, in that
    /// order. Returns `false` if shutdown already ran.
    pub fn shutdown(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        self.shut_down = true;
        self.running = false;

        drop(self.label.take());
        debug!("Released label image");
        drop(self.canvas.take());
        debug!("Released drawing surface");
        drop(self.window.take());
        debug!("Released window");
        drop(self.text.take());

        info!("Shutdown complete after {} frames", self.frames);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    /// Dimensions of the label image, as stored on the canvas
    pub fn label_size(&self) -> Option<(u32, u32)> {
        let canvas = self.canvas.as_ref()?;
        self.label.as_ref().map(|label| canvas.image_size(label))
    }

    /// Whether the text subsystem is still held
    pub fn has_text_engine(&self) -> bool {
        self.text.is_some()
    }
}

/// Where the label lands on `canvas`, in its physical pixels
fn label_rect<C: Canvas>(config: &AppConfig, canvas: &C, label: &C::Image) -> Rect {
    let origin = config.label_position.scaled(canvas.scale_factor());
    Rect::at(origin, canvas.image_size(label))
}

impl<W, C: Canvas, T> Drop for App<W, C, T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
