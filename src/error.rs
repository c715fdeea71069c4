//! Error types for startup and the event loop

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use winit::error::{EventLoopError, OsError};

/// Application error type
///
/// Every variant is fatal: the binary reports it and exits with status 1.
#[derive(Error, Debug)]
pub enum Error {
    /// The windowing system could not be initialized
    #[error("Video initialization failed: {0}")]
    VideoInit(#[source] EventLoopError),

    /// The font file could not be read
    #[error("Failed to load font {}: {source}", .path.display())]
    FontIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The font data could not be parsed
    #[error("Failed to load font: {0}")]
    FontParse(String),

    /// Window creation failed
    #[error("Failed to create window: {0}")]
    Window(#[from] OsError),

    /// The drawing surface could not be bound to the window
    #[error("Failed to create drawing surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    /// No usable GPU adapter, device or swapchain
    #[error("GPU initialization failed: {0}")]
    Gpu(String),

    /// The event loop terminated abnormally
    #[error("Event loop error: {0}")]
    EventLoop(#[source] EventLoopError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, Error>;
