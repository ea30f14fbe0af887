//! Normal-mode key bindings
//!
//! The keymap only says what a key *means*. Sequencing (counts, prefixes,
//! paired halves) lives in the dispatcher.

use std::collections::HashMap;

use super::key::{Key, Modifiers};

/// A completed normal-mode command, identified independently of its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalCommand {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveOrigin,
    SetMark(char),
    GotoMark(char),
    StartPath,
    AppendPath,
    GridScaleUp,
    GridScaleDown,
    ToggleGrid,
    EnterEx,
}

impl NormalCommand {
    /// Short description for logging and the status line
    pub fn description(&self) -> &'static str {
        match self {
            NormalCommand::MoveLeft => "move left",
            NormalCommand::MoveRight => "move right",
            NormalCommand::MoveUp => "move up",
            NormalCommand::MoveDown => "move down",
            NormalCommand::MoveOrigin => "move to origin",
            NormalCommand::SetMark(_) => "set mark",
            NormalCommand::GotoMark(_) => "go to mark",
            NormalCommand::StartPath => "start path",
            NormalCommand::AppendPath => "append path",
            NormalCommand::GridScaleUp => "grid scale up",
            NormalCommand::GridScaleDown => "grid scale down",
            NormalCommand::ToggleGrid => "toggle grid",
            NormalCommand::EnterEx => "enter ex mode",
        }
    }
}

/// Keys that need a second key before they mean anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `m{name}`
    SetMark,
    /// `` `{name} `` or `'{name}`
    GotoMark,
    /// `g{key}`
    Go,
}

impl Prefix {
    /// Resolve the key that follows this prefix. `None` means the key does not
    /// continue the sequence.
    pub fn complete(self, key: Key, mods: Modifiers) -> Option<NormalCommand> {
        let chorded = mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        let Key::Char(c) = key else {
            return None;
        };
        if chorded {
            return None;
        }
        match self {
            Prefix::SetMark if is_mark_name(c) => Some(NormalCommand::SetMark(c)),
            Prefix::GotoMark if is_mark_name(c) => Some(NormalCommand::GotoMark(c)),
            Prefix::Go => match c {
                'g' => Some(NormalCommand::MoveOrigin),
                'v' => Some(NormalCommand::ToggleGrid),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Mark names are single printable, non-space characters
pub fn is_mark_name(c: char) -> bool {
    c.is_alphanumeric() || c.is_ascii_punctuation()
}

/// What a key press resolves to at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Fires as soon as the key is pressed
    Command(NormalCommand),
    /// Waits for a continuation key
    Prefix(Prefix),
    /// Fires only once the key press and its translated text have both
    /// been seen. `text` is the character the layout is expected to produce.
    Paired { command: NormalCommand, text: char },
}

/// Normal-mode binding table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<(Key, Modifiers), Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut map = Self::empty();

        for (key, cmd) in [
            (Key::Char('h'), NormalCommand::MoveLeft),
            (Key::Char('j'), NormalCommand::MoveDown),
            (Key::Char('k'), NormalCommand::MoveUp),
            (Key::Char('l'), NormalCommand::MoveRight),
            (Key::Left, NormalCommand::MoveLeft),
            (Key::Down, NormalCommand::MoveDown),
            (Key::Up, NormalCommand::MoveUp),
            (Key::Right, NormalCommand::MoveRight),
            (Key::Char('+'), NormalCommand::GridScaleUp),
            (Key::Char('-'), NormalCommand::GridScaleDown),
            (Key::Char('p'), NormalCommand::StartPath),
            (Key::Char('a'), NormalCommand::AppendPath),
        ] {
            map.bind(key, Modifiers::empty(), Binding::Command(cmd));
        }

        map.bind(Key::Char('m'), Modifiers::empty(), Binding::Prefix(Prefix::SetMark));
        map.bind(Key::Char('`'), Modifiers::empty(), Binding::Prefix(Prefix::GotoMark));
        map.bind(Key::Char('\''), Modifiers::empty(), Binding::Prefix(Prefix::GotoMark));
        map.bind(Key::Char('g'), Modifiers::empty(), Binding::Prefix(Prefix::Go));

        let enter_ex = Binding::Paired {
            command: NormalCommand::EnterEx,
            text: ':',
        };
        map.bind(Key::Char(':'), Modifiers::empty(), enter_ex);
        // Layouts that report the unshifted key for ':'
        map.bind(Key::Char(';'), Modifiers::SHIFT, enter_ex);

        map
    }
}

impl Keymap {
    /// A keymap with no bindings at all
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a key, replacing any earlier binding for the same chord
    pub fn bind(&mut self, key: Key, mods: Modifiers, binding: Binding) {
        self.bindings.insert((key, normalize(key, mods)), binding);
    }

    pub fn unbind(&mut self, key: Key, mods: Modifiers) -> Option<Binding> {
        self.bindings.remove(&(key, normalize(key, mods)))
    }

    pub fn lookup(&self, key: Key, mods: Modifiers) -> Option<Binding> {
        self.bindings.get(&(key, normalize(key, mods))).copied()
    }

    /// Whether some paired binding is waiting for this text
    pub fn expects_text(&self, text: &str) -> bool {
        let mut chars = text.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return false;
        };
        self.bindings
            .values()
            .any(|b| matches!(b, Binding::Paired { text, .. } if *text == c))
    }
}

/// Shift is already folded into the character for printable keys ('A', ':'),
/// so it is ignored there unless the binding asked for it explicitly.
fn normalize(key: Key, mods: Modifiers) -> Modifiers {
    match key {
        Key::Char(c) if !c.is_ascii_alphanumeric() && c != ';' => mods - Modifiers::SHIFT,
        Key::Char(c) if c.is_ascii_uppercase() => mods - Modifiers::SHIFT,
        _ => mods,
    }
}
