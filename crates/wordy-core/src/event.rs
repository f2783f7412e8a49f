#![forbid(unsafe_code)]

//! Canonical page input events.
//!
//! Hosts translate DOM listener callbacks (`keydown`, `keyup`, `mousemove`,
//! window `focus`/`blur`, selection changes) into [`PageEvent`] values. Only
//! the fields the hover core reads are carried.

use crate::geometry::Point;

/// Operating system family, used to pick the activation hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    MacOs,
    #[default]
    Other,
}

impl Platform {
    /// Detect the platform from a `navigator.userAgent` string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Mac OS X") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// The modifier that arms hover detection on this platform.
    #[must_use]
    pub const fn hotkey(self) -> Key {
        match self {
            Self::MacOs => Key::Meta,
            Self::Other => Key::Control,
        }
    }

    /// Whether `key` is this platform's hotkey.
    #[inline]
    #[must_use]
    pub fn is_hotkey(self, key: &Key) -> bool {
        *key == self.hotkey()
    }
}

/// A keyboard key, named after `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Meta,
    Control,
    Shift,
    Alt,
    Escape,
    Char(char),
    /// Any other named key, verbatim.
    Named(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(name: &str) -> Self {
        match name {
            "Meta" => Self::Meta,
            "Control" => Self::Control,
            "Shift" => Self::Shift,
            "Alt" => Self::Alt,
            "Escape" => Self::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Named(other.to_string()),
                }
            }
        }
    }
}

/// A key press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// `KeyboardEvent.repeat`: true for auto-repeat while held.
    pub repeat: bool,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self { key, repeat: false }
    }

    #[must_use]
    pub const fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}

/// One input event from the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Pointer moved to a viewport coordinate (`clientX`/`clientY`).
    MouseMove(Point),
    /// Text selected by the user; `point` is where the selection ended.
    Selection { text: String, point: Point },
    WindowFocus,
    WindowBlur,
}

impl PageEvent {
    /// Whether this event needs debouncing before word resolution.
    #[inline]
    #[must_use]
    pub fn is_pointer_motion(&self) -> bool {
        matches!(self, Self::MouseMove(_))
    }
}
