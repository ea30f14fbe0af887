//! Normal-mode dispatcher - resumable state machine
//!
//! Design principles:
//! - Events go in one at a time, completed commands come out
//! - "Waiting for the next key" is plain state on the struct, so a sequence
//!   can span any number of `handle` calls
//! - The dispatcher never touches the editor; it returns an `Action` and the
//!   mode controller decides where it goes
//! - Escape is the only cancellation and always lands back in `Idle`

use std::time::Instant;

use super::key::{Key, KeyRole, Modifiers};
use super::keymap::{Binding, Keymap, NormalCommand, Prefix};

/// Default number of timer ticks a prefix key waits for its continuation
pub const DEFAULT_PREFIX_TIMEOUT_TICKS: u32 = 20;

// ============================================================================
// Core Types
// ============================================================================

/// One input occurrence delivered to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalEvent {
    KeyPress(Key, Modifiers),
    KeyRelease(Key, Modifiers),
    /// Text the platform produced for the most recent keystroke
    Text(String),
    /// Periodic tick from the host's timer
    TimerFire(Instant),
    Escape,
}

/// A completed normal-mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub command: NormalCommand,
    /// Repeat count typed before the command, 1 when none was typed
    pub multiplier: u32,
}

impl Action {
    pub fn new(command: NormalCommand, multiplier: u32) -> Self {
        Self {
            command,
            multiplier,
        }
    }
}

/// Observable dispatcher state (for the status line and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    AccumulatingMultiplier,
    AwaitingPrefixContinuation(Prefix),
    AwaitingPairedHalf,
}

/// Accumulated repeat count
#[derive(Debug, Default, Clone)]
struct Multiplier {
    current: Option<u32>,
}

impl Multiplier {
    fn push_digit(&mut self, d: u8) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(u32::from(d));
        self.current = Some(next);
    }

    fn take(&mut self) -> u32 {
        self.current.take().unwrap_or(1).max(1)
    }

    fn is_pending(&self) -> bool {
        self.current.is_some()
    }
}

/// A prefix key waiting for its continuation
#[derive(Debug, Clone, Copy)]
struct PendingPrefix {
    prefix: Prefix,
    ticks: u32,
}

/// One half of a paired keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairedHalf {
    /// The key press was classified, its text has not arrived yet
    Down { command: NormalCommand, text: char },
    /// The text arrived before its key press
    Text(char),
}

// ============================================================================
// Dispatcher
// ============================================================================

#[derive(Debug, Clone)]
pub struct NormalDispatcher {
    keymap: Keymap,
    multiplier: Multiplier,
    prefix: Option<PendingPrefix>,
    paired: Option<PairedHalf>,
    /// Text still to arrive from a key press that was already consumed
    owed_text: Option<char>,
    prefix_timeout_ticks: u32,
}

impl Default for NormalDispatcher {
    fn default() -> Self {
        Self::new(Keymap::default())
    }
}

impl NormalDispatcher {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            multiplier: Multiplier::default(),
            prefix: None,
            paired: None,
            owed_text: None,
            prefix_timeout_ticks: DEFAULT_PREFIX_TIMEOUT_TICKS,
        }
    }

    /// Set how many ticks a prefix waits before it is dropped (minimum 1)
    pub fn with_prefix_timeout(mut self, ticks: u32) -> Self {
        self.prefix_timeout_ticks = ticks.max(1);
        self
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    pub fn state(&self) -> DispatchState {
        if self.paired.is_some() {
            DispatchState::AwaitingPairedHalf
        } else if let Some(p) = self.prefix {
            DispatchState::AwaitingPrefixContinuation(p.prefix)
        } else if self.multiplier.is_pending() {
            DispatchState::AccumulatingMultiplier
        } else {
            DispatchState::Idle
        }
    }

    /// The count typed so far, if any
    pub fn pending_multiplier(&self) -> Option<u32> {
        self.multiplier.current
    }

    /// Drop all pending state without firing anything
    pub fn reset(&mut self) {
        self.multiplier = Multiplier::default();
        self.prefix = None;
        self.paired = None;
        self.owed_text = None;
    }

    // ========================================================================
    // Event processing - the main entry point
    // ========================================================================

    /// Feed one event. Returns the command it completed, if any.
    pub fn handle(&mut self, event: NormalEvent) -> Option<Action> {
        match event {
            NormalEvent::Escape => {
                self.reset();
                None
            }
            NormalEvent::TimerFire(_) => {
                self.tick();
                None
            }
            // Releases never complete or cancel anything
            NormalEvent::KeyRelease(..) => None,
            NormalEvent::Text(text) => self.on_text(&text),
            NormalEvent::KeyPress(key, mods) => self.on_key_press(key, mods),
        }
    }

    fn tick(&mut self) {
        let Some(pending) = self.prefix.as_mut() else {
            return;
        };
        pending.ticks += 1;
        if pending.ticks >= self.prefix_timeout_ticks {
            tracing::trace!(prefix = ?pending.prefix, "prefix timed out");
            self.prefix = None;
            self.multiplier = Multiplier::default();
        }
    }

    fn on_text(&mut self, text: &str) -> Option<Action> {
        let mut chars = text.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            // Multi-character text (paste, IME) never completes a pair
            _ => {
                self.paired = None;
                self.owed_text = None;
                return None;
            }
        };

        // The text of a keystroke that already did its job
        if self.owed_text.take() == Some(c) {
            return None;
        }

        match self.paired {
            Some(PairedHalf::Down { command, text }) if text == c => Some(self.commit(command)),
            _ if self.keymap.expects_text(text) => {
                self.paired = Some(PairedHalf::Text(c));
                None
            }
            _ => {
                // The keystroke behind a pending down half produced something else
                self.paired = None;
                None
            }
        }
    }

    fn on_key_press(&mut self, key: Key, mods: Modifiers) -> Option<Action> {
        let role = KeyRole::classify(key, mods);
        if role.is_cancel() {
            self.reset();
            return None;
        }

        // Any key press replaces a stale half and any unclaimed text
        let stale_half = self.paired.take();
        self.owed_text = None;
        let typed = self.typed_char(key, mods);

        if let Some(pending) = self.prefix.take() {
            if let Some(command) = pending.prefix.complete(key, mods) {
                self.owed_text = typed;
                return Some(self.commit(command));
            }
            // No match: start over with this key as a fresh command
            self.multiplier = Multiplier::default();
        }

        if let KeyRole::Digit(d) = role {
            if d != 0 || self.multiplier.is_pending() {
                self.multiplier.push_digit(d);
                self.owed_text = typed;
                return None;
            }
        }

        match self.keymap.lookup(key, mods)? {
            Binding::Command(command) => {
                self.owed_text = typed;
                Some(self.commit(command))
            }
            Binding::Prefix(prefix) => {
                self.prefix = Some(PendingPrefix { prefix, ticks: 0 });
                self.owed_text = typed;
                None
            }
            Binding::Paired { command, text } => {
                if stale_half == Some(PairedHalf::Text(text)) {
                    return Some(self.commit(command));
                }
                self.paired = Some(PairedHalf::Down { command, text });
                None
            }
        }
    }

    /// The character a key press is expected to type, if any. Paired
    /// bindings know their text ("Shift+;" types ':').
    fn typed_char(&self, key: Key, mods: Modifiers) -> Option<char> {
        let Key::Char(c) = key else {
            return None;
        };
        if mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META) {
            return None;
        }
        match self.keymap.lookup(key, mods) {
            Some(Binding::Paired { text, .. }) => Some(text),
            _ => Some(c),
        }
    }

    fn commit(&mut self, command: NormalCommand) -> Action {
        let multiplier = self.multiplier.take();
        self.prefix = None;
        self.paired = None;
        Action::new(command, multiplier)
    }
}

// ============================================================================
// Tests - Comprehensive test suite in dispatcher_tests.rs
// ============================================================================

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
