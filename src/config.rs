//! Application Configuration
//!
//! Everything the program needs to know is fixed at compile time. The
//! constants are gathered into [`AppConfig`] so the rest of the crate takes
//! them as a value instead of reaching for globals.

use std::path::PathBuf;
use std::time::Duration;

use crate::renderer::{Point, Rgb, Rgba};

/// Window title
pub const WINDOW_TITLE: &str = "App Title";
/// Window width in logical pixels
pub const WINDOW_WIDTH: u32 = 640;
/// Window height in logical pixels
pub const WINDOW_HEIGHT: u32 = 480;
/// Font asset, relative to the working directory
pub const FONT_PATH: &str = "font.ttf";
/// Font size in points
pub const FONT_SIZE: f32 = 32.0;
/// Label text
pub const MESSAGE: &str = "WELCOME";
/// Label color (opaque magenta)
pub const TEXT_COLOR: Rgba = Rgba::new(255, 30, 255, 255);
/// Background color
pub const CLEAR_COLOR: Rgb = Rgb::new(20, 20, 20);
/// Top-left corner of the label
pub const LABEL_POSITION: Point = Point::new(50, 50);
/// Delay between frames when the application paces itself (~60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Path of the font asset
    pub font_path: PathBuf,
    /// Font size in points
    pub font_size: f32,
    /// Text rendered into the label
    pub message: String,
    /// Label color
    pub text_color: Rgba,
    /// Color every frame is cleared to
    pub clear_color: Rgb,
    /// Where the label is drawn
    pub label_position: Point,
    /// Inter-frame delay for the self-paced loop
    pub frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            font_path: PathBuf::from(FONT_PATH),
            font_size: FONT_SIZE,
            message: MESSAGE.to_string(),
            text_color: TEXT_COLOR,
            clear_color: CLEAR_COLOR,
            label_position: LABEL_POSITION,
            frame_interval: FRAME_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = AppConfig::default();
        assert_eq!(config.title, "App Title");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.font_path, PathBuf::from("font.ttf"));
        assert_eq!(config.font_size, 32.0);
        assert_eq!(config.message, "WELCOME");
        assert_eq!(config.text_color, Rgba::new(255, 30, 255, 255));
        assert_eq!(config.clear_color, Rgb::new(20, 20, 20));
        assert_eq!(config.label_position, Point::new(50, 50));
        assert_eq!(config.frame_interval, Duration::from_millis(16));
    }
}
