//! Input event surface for caller-supplied dispatch functions
//!
//! Imperative behavior operations do not talk to a browser themselves; they
//! hand each synthesized event to a dispatch function supplied by the
//! caller. The vocabulary here is backend-neutral: anything that can deliver
//! one event to a page (a CDP client, a WebDriver session, a test recorder)
//! can sit on the other side.

use serde::Serialize;

/// Mouse button for press and release events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// One synthesized input event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved to viewport coordinates.
    MouseMove { x: f64, y: f64 },
    /// Button pressed at viewport coordinates.
    MouseDown {
        x: f64,
        y: f64,
        button: MouseButton,
    },
    /// Button released at viewport coordinates.
    MouseUp {
        x: f64,
        y: f64,
        button: MouseButton,
    },
    /// Wheel scrolled at viewport coordinates.
    Wheel { x: f64, y: f64, delta_y: f64 },
    /// A typed character.
    Char { ch: char },
    /// Named key pressed.
    KeyDown { key: String },
    /// Named key released.
    KeyUp { key: String },
    /// Focus moved to the element matching a selector.
    Focus { selector: String },
}
