//! Events.
//!
//! Events are pushed by the windowing layer in root coordinates (the top left corner of the
//! window's content area, positive y pointing down). Containers re-express positional events in
//! the local coordinate system of their children while dispatching; see
//! [`Event::map_position`].

use cgmath::{Point2, Vector2};
use std::path::PathBuf;

/// Pointer buttons.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

impl MouseButton {
    /// Maps a raw button id from the windowing layer (0 = left, 1 = right, 2 = middle).
    pub fn from_raw(id: u8) -> Option<MouseButton> {
        match id {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Modifier key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Whether any shift key is pressed.
    pub shift: bool,

    /// Whether any control key is pressed.
    pub control: bool,

    /// Whether any option key or alt key is pressed.
    pub alt: bool,

    /// Whether any command key or super key is pressed.
    pub command: bool,
}

/// Keyboard layout-independent identifiers for the keys the runtime interprets itself.
///
/// Everything else is passed through as [`KeyCode::Other`] with the raw code from the windowing
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Return,
    Tab,
    Space,
    Backspace,
    Delete,
    Escape,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Home,
    End,
    PageUp,
    PageDown,
    Other(u32),
}

/// An input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The pointer moved.
    PointerMove { position: Point2<f32> },

    /// A pointer button was pressed. `time` is a timestamp in seconds, used for double-click
    /// detection.
    PointerPress {
        position: Point2<f32>,
        button: MouseButton,
        time: f64,
    },

    /// A pointer button was released.
    PointerRelease {
        position: Point2<f32>,
        button: MouseButton,
        time: f64,
    },

    /// A scroll wheel or trackpad scrolled; `delta` is in scroll steps.
    Scroll {
        position: Point2<f32>,
        delta: Vector2<f32>,
    },

    /// A key was pressed (or repeated).
    KeyPress { key: KeyCode, modifiers: Modifiers },

    /// A key was released.
    KeyRelease { key: KeyCode, modifiers: Modifiers },

    /// A character was typed.
    Text(char),

    /// Files were dropped onto the window.
    FileDrop(Vec<PathBuf>),
}

impl Event {
    /// Returns the pointer location, if this is a positional event.
    pub fn position(&self) -> Option<Point2<f32>> {
        match self {
            Event::PointerMove { position }
            | Event::PointerPress { position, .. }
            | Event::PointerRelease { position, .. }
            | Event::Scroll { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Returns a copy of this event with its position mapped through `map`.
    ///
    /// Non-positional events are copied unchanged. Returns `None` if the mapping fails (e.g. the
    /// point can't be expressed in a degenerate coordinate system).
    pub fn map_position<F>(&self, map: F) -> Option<Event>
    where
        F: FnOnce(Point2<f32>) -> Option<Point2<f32>>,
    {
        let mut event = self.clone();
        match &mut event {
            Event::PointerMove { position }
            | Event::PointerPress { position, .. }
            | Event::PointerRelease { position, .. }
            | Event::Scroll { position, .. } => {
                *position = map(*position)?;
            }
            _ => (),
        }
        Some(event)
    }

    pub fn is_pointer_move(&self) -> bool {
        match self {
            Event::PointerMove { .. } => true,
            _ => false,
        }
    }
}

#[test]
fn test_map_position() {
    let event = Event::PointerPress {
        position: Point2::new(10., 10.),
        button: MouseButton::Left,
        time: 0.,
    };
    let mapped = event
        .map_position(|p| Some(Point2::new(p.x - 4., p.y - 6.)))
        .unwrap();
    assert_eq!(mapped.position(), Some(Point2::new(6., 4.)));

    let key = Event::Text('a');
    assert_eq!(key.map_position(|_| None), Some(Event::Text('a')));
    assert_eq!(event.map_position(|_| None), None);
}
