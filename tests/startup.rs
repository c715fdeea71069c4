//! Startup failure tests
//!
//! The font path is checked twice: through the library's startup sequence,
//! which needs no display, and through the built binary, which only gets
//! as far as loading the font when a display is reachable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use welcome_window::app::render_label;
use welcome_window::renderer::TextEngine;
use welcome_window::{AppConfig, Error};

fn has_display() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY", "WAYLAND_SOCKET"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

fn system_font() -> Option<PathBuf> {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    ];
    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_welcome-window"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run welcome-window")
}

#[test]
fn startup_sequence_rejects_missing_font() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        font_path: dir.path().join("font.ttf"),
        ..AppConfig::default()
    };

    let text = TextEngine::new();
    let err = render_label(&text, &config, 1.0).unwrap_err();

    match &err {
        Error::FontIo { path, .. } => assert_eq!(path, &config.font_path),
        other => panic!("expected a font error, got {:?}", other),
    }
    assert!(err.to_string().contains("font.ttf"));
}

#[test]
fn startup_sequence_rejects_corrupt_font() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("font.ttf");
    std::fs::write(&font_path, b"not a font").unwrap();
    let config = AppConfig {
        font_path,
        ..AppConfig::default()
    };

    let err = render_label(&TextEngine::new(), &config, 1.0).unwrap_err();
    assert!(matches!(err, Error::FontParse(_)), "got {:?}", err);
    assert!(err.to_string().to_lowercase().contains("font"));
}

#[test]
fn startup_sequence_renders_with_font_present() {
    let Some(system) = system_font() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("font.ttf");
    std::fs::copy(&system, &font_path).unwrap();
    let config = AppConfig {
        font_path,
        ..AppConfig::default()
    };

    let text = TextEngine::new();
    let bitmap = render_label(&text, &config, 1.0).unwrap();
    let natural = text
        .open_font(&config.font_path, config.font_size)
        .unwrap()
        .measure(&config.message);

    assert_eq!(bitmap.dimensions(), natural);
    assert!(bitmap.width() > 0 && bitmap.height() > 0);
}

#[test]
fn missing_font_exits_with_status_one() {
    if !has_display() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Starting App"));

    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    assert!(stderr.contains("font"), "unexpected diagnostic: {}", stderr);
    assert!(!stderr.contains("video"), "unexpected diagnostic: {}", stderr);
}

#[test]
fn missing_display_exits_with_status_one() {
    if has_display() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path());

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    assert!(
        stderr.contains("video initialization failed"),
        "unexpected diagnostic: {}",
        stderr
    );
}
