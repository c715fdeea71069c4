//! Frame cycle and shutdown tests
//!
//! Drives `App` with a canvas, window and text subsystem that record every
//! operation and release, so the order of draws and teardown can be checked
//! without a display.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use welcome_window::app::{render_label, EventQueue, Input, Key};
use welcome_window::renderer::{Canvas, Rect, Rgb, TextBitmap, TextEngine};
use welcome_window::{App, AppConfig, Flow};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    CreateImage(u32, u32),
    Clear(Rgb),
    Copy(Rect),
    Present,
    Released(&'static str),
}

type Log = Rc<RefCell<Vec<Op>>>;

/// Records its own release
struct Tracked {
    name: &'static str,
    log: Log,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Op::Released(self.name));
    }
}

struct Image {
    size: (u32, u32),
    _guard: Tracked,
}

struct RecordingCanvas {
    log: Log,
    scale_factor: f64,
    _guard: Tracked,
}

impl Canvas for RecordingCanvas {
    type Image = Image;

    fn create_image(&mut self, bitmap: &TextBitmap) -> Image {
        let (w, h) = bitmap.dimensions();
        self.log.borrow_mut().push(Op::CreateImage(w, h));
        Image {
            size: (w, h),
            _guard: Tracked {
                name: "label",
                log: self.log.clone(),
            },
        }
    }

    fn image_size(&self, image: &Image) -> (u32, u32) {
        image.size
    }

    fn clear(&mut self, color: Rgb) {
        self.log.borrow_mut().push(Op::Clear(color));
    }

    fn copy(&mut self, _image: &Image, dst: Rect) {
        self.log.borrow_mut().push(Op::Copy(dst));
    }

    fn present(&mut self) {
        self.log.borrow_mut().push(Op::Present);
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

fn tracked(name: &'static str, log: &Log) -> Tracked {
    Tracked {
        name,
        log: log.clone(),
    }
}

fn recording_canvas(log: &Log) -> RecordingCanvas {
    RecordingCanvas {
        log: log.clone(),
        scale_factor: 1.0,
        _guard: Tracked {
            name: "surface",
            log: log.clone(),
        },
    }
}

type RecordingApp = App<Tracked, RecordingCanvas, Tracked>;

fn recording_app(label: &TextBitmap) -> (RecordingApp, Log) {
    recording_app_scaled(label, 1.0)
}

fn recording_app_scaled(label: &TextBitmap, scale_factor: f64) -> (RecordingApp, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let canvas = RecordingCanvas {
        scale_factor,
        ..recording_canvas(&log)
    };
    let app = App::new(
        AppConfig::default(),
        tracked("text", &log),
        tracked("window", &log),
        canvas,
        label,
    );
    log.borrow_mut().clear();
    (app, log)
}

const RELEASE_ORDER: [Op; 4] = [
    Op::Released("label"),
    Op::Released("surface"),
    Op::Released("window"),
    Op::Released("text"),
];

fn frame_ops(w: u32, h: u32) -> Vec<Op> {
    vec![
        Op::Clear(Rgb::new(20, 20, 20)),
        Op::Copy(Rect::new(50, 50, w, h)),
        Op::Present,
    ]
}

fn count(log: &Log, op: &Op) -> usize {
    log.borrow().iter().filter(|o| *o == op).count()
}

#[test]
fn label_image_created_from_bitmap() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let app = App::new(
        AppConfig::default(),
        TextEngine::new(),
        (),
        recording_canvas(&log),
        &TextBitmap::new(120, 37),
    );

    assert_eq!(log.borrow()[0], Op::CreateImage(120, 37));
    assert_eq!(app.label_size(), Some((120, 37)));
}

#[test]
fn frame_clears_draws_then_presents() {
    let (mut app, log) = recording_app(&TextBitmap::new(120, 37));
    let mut events = EventQueue::new();

    assert_eq!(app.frame(&mut events), Flow::Continue);
    assert_eq!(*log.borrow(), frame_ops(120, 37));
}

#[test]
fn every_frame_presents_exactly_once() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    let mut events = EventQueue::new();

    for _ in 0..5 {
        assert_eq!(app.frame(&mut events), Flow::Continue);
    }

    let expected: Vec<Op> = (0..5).flat_map(|_| frame_ops(8, 4)).collect();
    assert_eq!(*log.borrow(), expected);
    assert_eq!(app.frames(), 5);
}

#[test]
fn initial_draw_does_not_present() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    app.draw_initial();

    assert_eq!(*log.borrow(), vec![Op::Copy(Rect::new(50, 50, 8, 4))]);
}

#[test]
fn close_request_shuts_down_in_reverse_order() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    let mut events = EventQueue::new();
    events.push(Input::CloseRequested);

    assert_eq!(app.frame(&mut events), Flow::Exit);
    assert!(!app.is_running());
    assert!(!app.has_text_engine());

    let mut expected = frame_ops(8, 4);
    expected.extend(RELEASE_ORDER);
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn escape_shuts_down_on_the_same_frame() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    let mut events = EventQueue::new();

    assert_eq!(app.frame(&mut events), Flow::Continue);
    events.push(Input::KeyPressed(Key::Other));
    events.push(Input::KeyPressed(Key::Escape));
    assert_eq!(app.frame(&mut events), Flow::Exit);

    assert!(events.is_empty());
    assert_eq!(count(&log, &Op::Present), 2);
    assert_eq!(count(&log, &Op::Released("label")), 1);
}

#[test]
fn shutdown_runs_once() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    let mut events = EventQueue::new();
    events.push(Input::CloseRequested);
    events.push(Input::CloseRequested);
    assert_eq!(app.frame(&mut events), Flow::Exit);
    let after_exit = log.borrow().len();

    assert!(!app.shutdown());
    events.push(Input::KeyPressed(Key::Escape));
    assert_eq!(app.frame(&mut events), Flow::Exit);
    drop(app);

    assert_eq!(log.borrow().len(), after_exit);
    for op in &RELEASE_ORDER {
        assert_eq!(count(&log, op), 1);
    }
}

#[test]
fn dropping_a_running_app_releases_in_reverse_order() {
    let (app, log) = recording_app(&TextBitmap::new(8, 4));
    drop(app);

    assert_eq!(*log.borrow(), RELEASE_ORDER.to_vec());
}

#[test]
fn escape_releases_all_four_resources_in_reverse_order() {
    let (mut app, log) = recording_app(&TextBitmap::new(8, 4));
    let mut events = EventQueue::new();
    events.push(Input::KeyPressed(Key::Escape));

    assert_eq!(app.frame(&mut events), Flow::Exit);
    let released: Vec<Op> = log
        .borrow()
        .iter()
        .filter(|op| matches!(op, Op::Released(_)))
        .cloned()
        .collect();
    assert_eq!(released, RELEASE_ORDER.to_vec());
}

#[test]
fn label_position_follows_scale_factor() {
    let (mut app, log) = recording_app_scaled(&TextBitmap::new(16, 8), 2.0);
    app.frame(&mut EventQueue::new());
    assert_eq!(log.borrow()[1], Op::Copy(Rect::new(100, 100, 16, 8)));

    let (mut app, log) = recording_app_scaled(&TextBitmap::new(16, 8), 1.5);
    app.draw_initial();
    assert_eq!(*log.borrow(), vec![Op::Copy(Rect::new(75, 75, 16, 8))]);
}

#[test]
fn label_is_drawn_at_natural_text_size() {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    ];
    let Some(font_path) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) else {
        return;
    };

    let config = AppConfig {
        font_path,
        ..AppConfig::default()
    };
    let text = TextEngine::new();
    let natural = text
        .open_font(&config.font_path, config.font_size)
        .unwrap()
        .measure(&config.message);
    let bitmap = render_label(&text, &config, 1.0).unwrap();

    let (mut app, log) = recording_app(&bitmap);
    assert_eq!(app.label_size(), Some(natural));

    app.frame(&mut EventQueue::new());
    assert_eq!(
        log.borrow()[1],
        Op::Copy(Rect::new(50, 50, natural.0, natural.1))
    );
}
