//! Welcome Window
//!
//! Opens a fixed-size window and draws a pre-rendered text label over a
//! solid background every frame until the window is closed or Escape is
//! pressed.
//!
//! - `config`: compile-time constants
//! - `renderer`: text rasterization, drawing surfaces, window presentation
//! - `app`: application state, frame cycle, shutdown, event loop driving

pub mod app;
pub mod config;
pub mod error;
pub mod renderer;

pub use app::{launch, App, Flow, Pacing};
pub use config::AppConfig;
pub use error::{Error, Result};
