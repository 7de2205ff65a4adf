//! Terminal-independent keyboard input.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the controller never depends on a terminal library.

/// A key press as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character (shifted characters arrive already shifted)
    Char(char),
    /// Character with Ctrl held (Ctrl+c, Ctrl+u, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// The character this key types into a text field, if any
    pub fn typed_char(self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Ctrl+C quits from every mode
    pub fn is_force_quit(self) -> bool {
        self == InputKey::CharCtrl('c')
    }
}
