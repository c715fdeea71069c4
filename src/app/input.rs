//! Input Handling
//!
//! Translates winit window events into the few inputs the application
//! reacts to and queues them until the next frame drains them.

use std::collections::VecDeque;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Keys the application distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// An input event as seen by the frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The window manager asked the window to close
    CloseRequested,
    /// A key went down
    KeyPressed(Key),
}

impl Input {
    /// Whether this input begins shutdown
    pub fn requests_exit(&self) -> bool {
        matches!(self, Input::CloseRequested | Input::KeyPressed(Key::Escape))
    }
}

/// Translate a window event; `None` for everything the application ignores
pub fn translate(event: &WindowEvent) -> Option<Input> {
    match event {
        WindowEvent::CloseRequested => Some(Input::CloseRequested),
        WindowEvent::KeyboardInput { event, .. } => map_key(&event.logical_key, event.state),
        _ => None,
    }
}

/// Map a logical key press to an input. Releases are ignored.
pub fn map_key(key: &WinitKey, state: ElementState) -> Option<Input> {
    if state != ElementState::Pressed {
        return None;
    }

    let key = match key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        _ => Key::Other,
    };
    Some(Input::KeyPressed(key))
}

/// Inputs received since the last frame
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Input>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input
    pub fn push(&mut self, input: Input) {
        self.pending.push_back(input);
    }

    /// Queue the translation of a window event, if it has one
    pub fn push_window_event(&mut self, event: &WindowEvent) {
        if let Some(input) = translate(event) {
            self.push(input);
        }
    }

    /// Take every pending input, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = Input> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
