//! Keyboard and pointer capture
//!
//! Event callbacks only write; the simulation only reads through
//! [`InputSource::snapshot`] at the start of a tick.

use std::collections::HashSet;

use crate::sim::{Horizontal, TickInput};

/// Anything that can produce the input for the next tick
pub trait InputSource {
    /// Current input; one-shot triggers are consumed by the call
    fn snapshot(&mut self) -> TickInput;
}

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Start,
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` / `key` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "KeyD" | "d" | "D" => Some(Key::Right),
            "Space" | "Enter" | " " => Some(Key::Start),
            "KeyI" | "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Pressed-key set plus pointer position
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
    pointer_x: Option<f32>,
    start_pending: bool,
    autopilot: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; auto-repeat events are ignored
    pub fn key_down(&mut self, key: Key) {
        if !self.pressed.insert(key) {
            return;
        }
        match key {
            Key::Start => self.start_pending = true,
            Key::Autopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            // Keyboard steering takes over from the pointer
            Key::Left | Key::Right => self.pointer_x = None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Pointer moved to `x` in view coordinates
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    pub fn pointer_left(&mut self) {
        self.pointer_x = None;
    }

    /// Click/tap acts as the start trigger
    pub fn click(&mut self) {
        self.start_pending = true;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Drop everything held (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.pointer_x = None;
    }

    fn horizontal(&self) -> Horizontal {
        let left = self.pressed.contains(&Key::Left);
        let right = self.pressed.contains(&Key::Right);
        match (left, right) {
            (true, false) => Horizontal::Left,
            (false, true) => Horizontal::Right,
            _ => Horizontal::None,
        }
    }
}

impl InputSource for KeyboardState {
    fn snapshot(&mut self) -> TickInput {
        TickInput {
            horizontal: self.horizontal(),
            pointer_x: self.pointer_x,
            start: std::mem::take(&mut self.start_pending),
            autopilot: self.autopilot,
        }
    }
}
