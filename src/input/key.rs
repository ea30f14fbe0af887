//! Platform-independent key values
//!
//! The front end translates its own key events into these types once, at the
//! input boundary. Nothing past that point inspects raw platform codes.

/// A single key on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, as produced by the keyboard layout
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// The role a key plays for the modal core.
///
/// Resolved once per key event so the dispatcher and mode controller only
/// ever compare against this small fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Commits the command line
    Enter,
    /// Cancels whatever is in progress
    Escape,
    /// Ctrl+`[`, the chord equivalent of Escape
    CancelChord,
    /// A count digit 0-9 typed without Ctrl/Alt/Meta
    Digit(u8),
    /// Anything else, passed through untouched
    Other(Key, Modifiers),
}

impl KeyRole {
    pub fn classify(key: Key, mods: Modifiers) -> Self {
        let chorded = mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        match key {
            Key::Enter => KeyRole::Enter,
            Key::Esc => KeyRole::Escape,
            Key::Char('[') if mods.contains(Modifiers::CTRL) => KeyRole::CancelChord,
            Key::Char(c) if c.is_ascii_digit() && !chorded => KeyRole::Digit(c as u8 - b'0'),
            _ => KeyRole::Other(key, mods),
        }
    }

    /// Escape or its chord equivalent
    pub fn is_cancel(self) -> bool {
        matches!(self, KeyRole::Escape | KeyRole::CancelChord)
    }
}

/// Cursor movement and deletion inside the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMotion {
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
    Backspace,
    Delete,
    DeleteWordBackward,
    DeleteLine,
}

impl TextMotion {
    /// Map a key event to the command-line motion it performs, if any.
    ///
    /// Mirrors the readline-style chords most terminals users expect:
    /// Ctrl+W, Ctrl+U, Ctrl+A, Ctrl+E and Ctrl+H.
    pub fn from_key(key: Key, mods: Modifiers) -> Option<Self> {
        let ctrl = mods.contains(Modifiers::CTRL);
        let motion = match key {
            Key::Left if ctrl => TextMotion::WordLeft,
            Key::Right if ctrl => TextMotion::WordRight,
            Key::Left => TextMotion::Left,
            Key::Right => TextMotion::Right,
            Key::Home => TextMotion::Home,
            Key::End => TextMotion::End,
            Key::Backspace => TextMotion::Backspace,
            Key::Delete => TextMotion::Delete,
            Key::Char('w') if ctrl => TextMotion::DeleteWordBackward,
            Key::Char('u') if ctrl => TextMotion::DeleteLine,
            Key::Char('a') if ctrl => TextMotion::Home,
            Key::Char('e') if ctrl => TextMotion::End,
            Key::Char('h') if ctrl => TextMotion::Backspace,
            _ => return None,
        };
        Some(motion)
    }
}
