//! Input event types for mouse and keyboard.
//!
//! Hosts forward these to a running modal session; a recorded list of them
//! replays a paint gesture.

use serde::{Deserialize, Serialize};

/// Mouse input events in viewport pixels (origin top-left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MouseEvent {
    Move { x: f32, y: f32 },
    ButtonDown { button: MouseButton, x: f32, y: f32 },
    ButtonUp { button: MouseButton, x: f32, y: f32 },
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
}

impl KeyboardEvent {
    /// Whether this is a press of the escape key
    pub fn is_escape_press(&self) -> bool {
        self.pressed && self.key.eq_ignore_ascii_case("escape")
    }
}

/// Any input event a modal session can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    Mouse(MouseEvent),
    Keyboard(KeyboardEvent),
}
