//! Keyboard and pointer events to input flags
//!
//! Events set and clear persistent booleans; the simulation samples the
//! current flags once per tick. Repeated presses collapse into one `true`.

use serde::{Deserialize, Serialize};

pub use crate::sim::InputState;

/// A direction the player can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

/// Key name (as reported by `KeyboardEvent.key`) to action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMap {
    bindings: Vec<(String, Action)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bindings = [
            ("ArrowUp", Action::Up),
            ("w", Action::Up),
            (" ", Action::Up),
            ("ArrowDown", Action::Down),
            ("s", Action::Down),
            ("ArrowLeft", Action::Left),
            ("a", Action::Left),
            ("ArrowRight", Action::Right),
            ("d", Action::Right),
        ];
        Self {
            bindings: bindings
                .into_iter()
                .map(|(key, action)| (key.to_string(), action))
                .collect(),
        }
    }
}

impl KeyMap {
    /// Letter keys match regardless of shift/caps lock
    pub fn action(&self, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == key || (bound.len() == 1 && bound.eq_ignore_ascii_case(key)))
            .map(|(_, action)| *action)
    }

    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        let key = key.into();
        self.bindings.retain(|(bound, _)| *bound != key);
        self.bindings.push((key, action));
    }
}

/// Tracks held keys and the pointer
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    map: KeyMap,
    keys: InputState,
    pointer_down: bool,
}

impl InputTracker {
    pub fn new(map: KeyMap) -> Self {
        Self {
            map,
            keys: InputState::default(),
            pointer_down: false,
        }
    }

    /// Returns true if the key is bound (callers may then suppress the
    /// browser's default handling, e.g. scrolling on arrow keys)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(action) = self.map.action(key) else {
            return false;
        };
        match action {
            Action::Up => self.keys.up = pressed,
            Action::Down => self.keys.down = pressed,
            Action::Left => self.keys.left = pressed,
            Action::Right => self.keys.right = pressed,
        }
        true
    }

    /// Pointer or touch press acts as up
    pub fn pointer_down(&mut self) {
        self.pointer_down = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    /// Forget everything held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys = InputState::default();
        self.pointer_down = false;
    }

    /// Flags for the next tick
    pub fn state(&self) -> InputState {
        InputState {
            up: self.keys.up || self.pointer_down,
            ..self.keys
        }
    }
}
