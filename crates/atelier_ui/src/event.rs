//! Input events the viewer reacts to.
//!
//! Hosts translate their native input (DOM events, winit window events) into
//! these types before handing them to [`crate::Viewer::on_event`].

use serde::{Deserialize, Serialize};

/// A position in host pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Events that the viewer can respond to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer button pressed over the image wrapper.
    PointerPressed { button: MouseButton, position: Point },
    /// Pointer moved anywhere in the window.
    PointerMoved { position: Point },
    /// Pointer button released anywhere in the window.
    PointerReleased { button: MouseButton, position: Point },
    /// Pointer left the image wrapper.
    PointerLeft,
    /// Double click (or double tap) on the image.
    DoubleClicked { position: Point },
    /// One discrete wheel/trackpad event. Negative `delta_y` scrolls toward the viewer.
    Wheel { delta_y: f32, position: Point },
    /// The browser viewport box changed (full width/height, not yet scaled down).
    Resized { width: f32, height: f32 },
    /// Keyboard key pressed.
    KeyPressed { key: Key, modifiers: Modifiers },
    /// One of the viewer's on-screen controls was activated.
    Control(Control),
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            n => MouseButton::Other(n.max(0) as u16),
        }
    }
}

/// Keyboard keys the viewer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Unbound keys yield `None`.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Key::Escape),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// True when any command-style modifier is held (those keys belong to the host).
    pub fn any_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// On-screen controls of the enlarged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Previous,
    Next,
    Close,
    Download,
}

/// Navigation direction reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "prev")]
    Previous,
    #[serde(rename = "next")]
    Next,
}

impl Direction {
    /// Wire name used by page scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Previous => "prev",
            Direction::Next => "next",
        }
    }
}
