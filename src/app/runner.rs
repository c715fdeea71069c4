//! Event Loop Driver
//!
//! Brings up the subsystems in order, assembles the [`App`], and runs its
//! frame cycle under one of two pacing strategies:
//! - [`Pacing::Host`]: winit owns the loop and calls back on each redraw
//! - [`Pacing::Fixed`]: we pump winit ourselves and sleep between frames
//!
//! Both strategies feed the same [`EventQueue`] and call the same
//! [`App::frame`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::Window;

use super::{App, EventQueue, Flow};
use crate::config::{AppConfig, FRAME_INTERVAL};
use crate::error::{Error, Result};
use crate::renderer::{create_window, Canvas, TextBitmap, TextEngine, WindowCanvas};

type WindowApp = App<Arc<Window>, WindowCanvas>;

/// How frames are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// The windowing system invokes the frame on redraw
    Host,
    /// Run a frame, then sleep for the interval
    Fixed(Duration),
}

impl Pacing {
    /// Self-paced at `interval` where the platform lets us pump events,
    /// host-paced otherwise
    pub fn native(interval: Duration) -> Self {
        if cfg!(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "android",
            target_os = "linux",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd",
        )) {
            Pacing::Fixed(interval)
        } else {
            Pacing::Host
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::native(FRAME_INTERVAL)
    }
}

/// Load the configured font and render the configured message, with the
/// point size multiplied by `scale_factor` so the label keeps its logical
/// size on HiDPI displays.
///
/// The font is released before returning; only the bitmap survives.
pub fn render_label(
    text: &TextEngine,
    config: &AppConfig,
    scale_factor: f64,
) -> Result<TextBitmap> {
    let size = config.font_size * scale_factor as f32;
    let font = text.open_font(&config.font_path, size)?;
    Ok(text.render_blended(&font, &config.message, config.text_color))
}

/// Initialize everything, run until the user quits, and tear down.
pub fn launch(config: AppConfig, pacing: Pacing) -> Result<()> {
    let event_loop = EventLoop::new().map_err(Error::VideoInit)?;
    debug!("Video subsystem initialized");
    let text = TextEngine::new();

    // The font is loaded before any window exists so a missing asset
    // fails without showing anything. The window opens on the primary
    // monitor, so its scale factor sizes the glyphs.
    let scale_factor = event_loop
        .primary_monitor()
        .map_or(1.0, |monitor| monitor.scale_factor());
    let bitmap = render_label(&text, &config, scale_factor)?;

    let window = Arc::new(create_window(&event_loop, &config)?);
    let canvas = WindowCanvas::new(window.clone())?;
    info!(
        "Drawing surface ready ({})",
        if canvas.is_accelerated() { "GPU" } else { "software" }
    );
    if (canvas.scale_factor() - scale_factor).abs() > f64::EPSILON {
        warn!(
            "Window scale factor {} differs from the primary monitor's {}",
            canvas.scale_factor(),
            scale_factor
        );
    }
    let mut app = App::new(config, text, window, canvas, &bitmap);
    drop(bitmap);

    app.draw_initial();

    info!("Entering frame loop ({:?})", pacing);
    let result = match pacing {
        Pacing::Host => run_host(event_loop, &mut app),
        Pacing::Fixed(interval) => run_fixed(event_loop, &mut app, interval),
    };

    // A loop that ended without a quit request still releases everything.
    app.shutdown();
    debug!("Video subsystem shut down");
    result
}

/// What the host loop does after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostStep {
    Wait,
    Redraw,
    Exit,
}

/// React to one event delivered by the host loop
fn handle_host_event<W, C: Canvas, T>(
    app: &mut App<W, C, T>,
    events: &mut EventQueue,
    event: Event<()>,
) -> HostStep {
    match event {
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => match app.frame(events) {
            Flow::Exit => HostStep::Exit,
            Flow::Continue => HostStep::Wait,
        },

        Event::WindowEvent { event, .. } => {
            events.push_window_event(&event);
            HostStep::Wait
        }

        Event::AboutToWait if !app.is_shut_down() => HostStep::Redraw,

        // The loop is going away, and the video subsystem with it.
        Event::LoopExiting => {
            app.shutdown();
            HostStep::Wait
        }

        _ => HostStep::Wait,
    }
}

fn run_host(event_loop: EventLoop<()>, app: &mut WindowApp) -> Result<()> {
    let mut events = EventQueue::new();
    event_loop.set_control_flow(ControlFlow::Wait);

    event_loop
        .run(|event, elwt| match handle_host_event(app, &mut events, event) {
            HostStep::Redraw => {
                if let Some(window) = app.window() {
                    window.request_redraw();
                }
            }
            HostStep::Exit => elwt.exit(),
            HostStep::Wait => {}
        })
        .map_err(Error::EventLoop)
}

#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn run_fixed(mut event_loop: EventLoop<()>, app: &mut WindowApp, interval: Duration) -> Result<()> {
    use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

    let mut events = EventQueue::new();

    loop {
        let status = event_loop.pump_events(Some(Duration::ZERO), |event, _| {
            if let Event::WindowEvent { event, .. } = event {
                events.push_window_event(&event);
            }
        });

        if let PumpStatus::Exit(code) = status {
            info!("Event loop exited with code {}", code);
            app.shutdown();
            return Ok(());
        }

        if app.frame(&mut events) == Flow::Exit {
            return Ok(());
        }

        std::thread::sleep(interval);
    }
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn run_fixed(event_loop: EventLoop<()>, app: &mut WindowApp, _interval: Duration) -> Result<()> {
    tracing::warn!("Event pumping unavailable on this platform, using host pacing");
    run_host(event_loop, app)
}
