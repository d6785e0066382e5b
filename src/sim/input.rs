//! Keyboard state
//!
//! The host's key adapter writes into [`InputState`] between frames; the
//! avatar reads it during a tick through a [`KeyBindings`] table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw keyboard code, as delivered by the host (DOM `keyCode` numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const W: KeyCode = KeyCode(87);

    /// Highest code a DOM key event can carry
    pub const MAX_DOM: u32 = 255;

    /// Validate a raw DOM key code at the adapter boundary
    pub fn from_dom(raw: i64) -> Option<Self> {
        u32::try_from(raw)
            .ok()
            .filter(|code| *code <= Self::MAX_DOM)
            .map(KeyCode)
    }
}

/// Pressed/released state per key code. Unseen codes read as released.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<KeyCode, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down (`true`) or key-up (`false`)
    pub fn set_pressed(&mut self, code: KeyCode, is_pressed: bool) {
        self.keys.insert(code, is_pressed);
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.keys.get(&code).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|code| self.is_pressed(*code))
    }

    /// Treat every key as released (host lost focus)
    pub fn release_all(&mut self) {
        for pressed in self.keys.values_mut() {
            *pressed = false;
        }
    }
}

/// Which key codes drive which avatar action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::LEFT, KeyCode::A],
            right: vec![KeyCode::RIGHT, KeyCode::D],
            jump: vec![KeyCode::SPACE, KeyCode::UP, KeyCode::W],
        }
    }
}

/// Resolved action state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl KeyBindings {
    pub fn resolve(&self, input: &InputState) -> Controls {
        Controls {
            left: input.any_pressed(&self.left),
            right: input.any_pressed(&self.right),
            jump: input.any_pressed(&self.jump),
        }
    }
}

impl Controls {
    /// -1 for left, +1 for right, 0 for neither or both
    pub fn lateral_axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
