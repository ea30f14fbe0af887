//! Mode controller - routes input to the dispatcher or the command line
//!
//! Owns the current mode, the normal-mode dispatcher, the command-line
//! buffer, the ex registry and the keystroke log. The host (the drawing
//! editor) is passed into every call that may run a command, so the
//! controller and the host can live side by side without shared ownership.

use std::time::{Duration, Instant};

use crate::cmdline::CommandLine;
use crate::ex::{ExError, ExRegistry, COMMAND_MARKER};
use crate::keystroke_log::KeystrokeLog;
use crate::mode::Mode;

use super::dispatcher::{Action, NormalDispatcher, NormalEvent};
use super::key::{Key, KeyRole, Modifiers, TextMotion};
use super::keymap::NormalCommand;

/// Marker pushed into the keystroke log on cancel
pub const CANCEL_MARKER: &str = "^[";

/// The editor side of the modal core
pub trait Host {
    /// Carry out a completed normal-mode command
    fn perform(&mut self, action: Action);

    /// Show a failed ex command to the user
    fn report_error(&mut self, error: &ExError);
}

/// Whether a key press was consumed, so the window system skips its default
/// handling (e.g. closing on Escape)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Handled,
    Unhandled,
}

pub struct ModeController<H> {
    mode: Mode,
    command_line: CommandLine,
    dispatcher: NormalDispatcher,
    registry: ExRegistry<H>,
    keystrokes: KeystrokeLog,
}

impl<H> std::fmt::Debug for ModeController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("mode", &self.mode)
            .field("command_line", &self.command_line)
            .field("dispatcher", &self.dispatcher.state())
            .field("registry", &self.registry)
            .finish()
    }
}

impl<H: Host> ModeController<H> {
    pub fn new(registry: ExRegistry<H>, dispatcher: NormalDispatcher) -> Self {
        Self {
            mode: Mode::Normal,
            command_line: CommandLine::new(),
            dispatcher,
            registry,
            keystrokes: KeystrokeLog::new(),
        }
    }

    // ========================================================================
    // Public getters
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    pub fn dispatcher(&self) -> &NormalDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut NormalDispatcher {
        &mut self.dispatcher
    }

    pub fn registry(&self) -> &ExRegistry<H> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ExRegistry<H> {
        &mut self.registry
    }

    pub fn keystrokes(&self) -> &KeystrokeLog {
        &self.keystrokes
    }

    // ========================================================================
    // Mode transitions
    // ========================================================================

    /// Switch modes. The command line has focus exactly when the mode is Ex.
    pub fn set_mode(&mut self, mode: Mode) {
        let previous = self.mode;

        if self.mode.is_ex() {
            self.command_line.unfocus();
        }

        self.mode = mode;

        if mode.is_ex() {
            if previous.is_normal() {
                self.command_line.clear();
            }
            self.command_line.focus();
            self.dispatcher.reset();
        }

        if previous != mode {
            tracing::debug!(from = previous.as_str(), to = mode.as_str(), "mode change");
        }
    }

    /// Execute the command line and return to normal mode, whatever the
    /// outcome
    fn run_command(&mut self, host: &mut H) {
        if let Err(error) = self.command_line.execute(&self.registry, host) {
            tracing::warn!(%error, "ex command failed");
            host.report_error(&error);
        }
        self.set_mode(Mode::Normal);
    }

    fn apply(&mut self, host: &mut H, action: Action) {
        tracing::debug!(
            command = action.command.description(),
            multiplier = action.multiplier,
            "normal command"
        );
        match action.command {
            NormalCommand::EnterEx => {
                self.set_mode(Mode::Ex);
                self.command_line.on_text(&COMMAND_MARKER.to_string());
            }
            _ => host.perform(action),
        }
    }

    // ========================================================================
    // Input events
    // ========================================================================

    pub fn dispatch_key_press(&mut self, host: &mut H, key: Key, mods: Modifiers) -> Propagation {
        let role = KeyRole::classify(key, mods);

        if self.mode.is_ex() && role == KeyRole::Enter {
            self.run_command(host);
            return Propagation::Handled;
        }

        if role.is_cancel() {
            if !self.mode.is_normal() {
                self.set_mode(Mode::Normal);
            }
            self.keystrokes.push_text(CANCEL_MARKER);
            self.dispatcher.handle(NormalEvent::Escape);
            return Propagation::Handled;
        }

        if self.mode.is_normal() {
            if let Some(action) = self.dispatcher.handle(NormalEvent::KeyPress(key, mods)) {
                self.apply(host, action);
            }
        }

        Propagation::Unhandled
    }

    pub fn dispatch_key_release(&mut self, host: &mut H, key: Key, mods: Modifiers) {
        if self.mode.is_normal() {
            if let Some(action) = self.dispatcher.handle(NormalEvent::KeyRelease(key, mods)) {
                self.apply(host, action);
            }
        }
    }

    pub fn dispatch_text(&mut self, host: &mut H, text: &str) {
        match self.mode {
            Mode::Ex => {
                self.command_line.on_text(text);
                if self.command_line.is_empty() {
                    self.set_mode(Mode::Normal);
                }
            }
            Mode::Normal => {
                // Completes a pending ':' key press before it is logged
                if let Some(action) = self.dispatcher.handle(NormalEvent::Text(text.to_string())) {
                    self.apply(host, action);
                }
                self.keystrokes.push_text(text);
            }
        }
    }

    pub fn dispatch_text_motion(&mut self, motion: TextMotion) {
        if self.mode.is_ex() {
            self.command_line.on_text_motion(motion);
            if !self.command_line.has_focus() {
                self.set_mode(Mode::Normal);
            }
        }
    }

    /// Periodic tick from the host's timer. `delta` is the time since the
    /// previous tick; prefix timeouts count ticks, not time.
    pub fn timer_tick(&mut self, host: &mut H, delta: Duration) {
        tracing::trace!(?delta, "timer tick");
        if let Some(action) = self.dispatcher.handle(NormalEvent::TimerFire(Instant::now())) {
            self.apply(host, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ex::CommandError;
    use crate::input::dispatcher::DispatchState;

    /// Records everything the controller sends to the host
    #[derive(Default)]
    struct MockHost {
        actions: Vec<Action>,
        errors: Vec<ExError>,
        ran: Vec<Vec<String>>,
    }

    impl Host for MockHost {
        fn perform(&mut self, action: Action) {
            self.actions.push(action);
        }

        fn report_error(&mut self, error: &ExError) {
            self.errors.push(error.clone());
        }
    }

    fn create_controller() -> ModeController<MockHost> {
        let mut registry = ExRegistry::new();
        registry.register("cmd", |host: &mut MockHost, args: &[&str]| {
            host.ran.push(args.iter().map(|s| s.to_string()).collect());
            Ok(())
        });
        registry.register("fail", |_: &mut MockHost, _: &[&str]| {
            Err(CommandError::MissingOption)
        });
        ModeController::new(registry, NormalDispatcher::default())
    }

    fn no_mods() -> Modifiers {
        Modifiers::empty()
    }

    /// Deliver a printable key the way a window system does: press, then text
    fn type_char(c: &mut ModeController<MockHost>, host: &mut MockHost, ch: char) {
        c.dispatch_key_press(host, Key::Char(ch), no_mods());
        c.dispatch_text(host, &ch.to_string());
    }

    fn type_str(c: &mut ModeController<MockHost>, host: &mut MockHost, s: &str) {
        for ch in s.chars() {
            type_char(c, host, ch);
        }
    }

    fn press(c: &mut ModeController<MockHost>, host: &mut MockHost, key: Key) -> Propagation {
        c.dispatch_key_press(host, key, no_mods())
    }

    fn assert_focus_invariant(c: &ModeController<MockHost>) {
        assert_eq!(c.command_line().has_focus(), c.mode() == Mode::Ex);
    }

    #[test]
    fn test_starts_in_normal_mode() {
        let c = create_controller();
        assert_eq!(c.mode(), Mode::Normal);
        assert_focus_invariant(&c);
    }

    #[test]
    fn test_set_mode_focus_invariant() {
        let mut c = create_controller();
        for mode in [Mode::Ex, Mode::Ex, Mode::Normal, Mode::Normal, Mode::Ex, Mode::Normal] {
            c.set_mode(mode);
            assert_eq!(c.mode(), mode);
            assert_focus_invariant(&c);
        }
    }

    #[test]
    fn test_entering_ex_resets_dispatcher() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, "3m");
        c.set_mode(Mode::Ex);
        assert_eq!(c.dispatcher().state(), DispatchState::Idle);
    }

    #[test]
    fn test_colon_enters_ex_with_marker() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_char(&mut c, &mut host, ':');
        assert_eq!(c.mode(), Mode::Ex);
        assert_eq!(c.command_line().text(), ":");
        assert_focus_invariant(&c);
        assert!(host.actions.is_empty());
        assert_eq!(c.keystrokes().tail(8), ":");
    }

    #[test]
    fn test_colon_press_without_text_stays_normal() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        press(&mut c, &mut host, Key::Char(':'));
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn test_ex_command_roundtrip() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":cmd x y");
        assert_eq!(c.command_line().text(), ":cmd x y");

        let propagation = press(&mut c, &mut host, Key::Enter);
        assert_eq!(propagation, Propagation::Handled);
        assert_eq!(host.ran, vec![vec!["x".to_string(), "y".to_string()]]);
        assert_eq!(c.mode(), Mode::Normal);
        assert!(c.command_line().is_empty());
        assert_focus_invariant(&c);
    }

    #[test]
    fn test_unknown_command_reports_and_returns_to_normal() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":name a b c");
        press(&mut c, &mut host, Key::Enter);

        assert_eq!(
            host.errors,
            vec![ExError::UnknownCommand("name".to_string())]
        );
        assert_eq!(c.mode(), Mode::Normal);
        assert!(c.command_line().is_empty());
    }

    #[test]
    fn test_failed_command_returns_to_normal() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":fail");
        press(&mut c, &mut host, Key::Enter);

        assert_eq!(
            host.errors,
            vec![ExError::Command(CommandError::MissingOption)]
        );
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn test_escape_leaves_ex_and_is_handled() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":cm");

        let propagation = press(&mut c, &mut host, Key::Esc);
        assert_eq!(propagation, Propagation::Handled);
        assert_eq!(c.mode(), Mode::Normal);
        assert!(host.ran.is_empty());
        assert!(c.keystrokes().tail(8).ends_with(CANCEL_MARKER));
        assert_focus_invariant(&c);
    }

    #[test]
    fn test_cancel_chord_in_normal_mode() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, "5");
        let propagation = c.dispatch_key_press(&mut host, Key::Char('['), Modifiers::CTRL);
        assert_eq!(propagation, Propagation::Handled);
        assert_eq!(c.dispatcher().state(), DispatchState::Idle);

        type_char(&mut c, &mut host, 'l');
        assert_eq!(host.actions, vec![Action::new(NormalCommand::MoveRight, 1)]);
    }

    #[test]
    fn test_enter_in_normal_mode_is_not_commit() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        let propagation = press(&mut c, &mut host, Key::Enter);
        assert_eq!(propagation, Propagation::Unhandled);
        assert!(host.ran.is_empty());
        assert!(host.errors.is_empty());
    }

    #[test]
    fn test_multiplier_reaches_host_once() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, "2l");
        assert_eq!(host.actions, vec![Action::new(NormalCommand::MoveRight, 2)]);
        assert_eq!(c.keystrokes().tail(8), "2l");
    }

    #[test]
    fn test_backspace_over_marker_returns_to_normal() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":a");
        c.dispatch_text_motion(TextMotion::Backspace);
        assert_eq!(c.mode(), Mode::Ex);
        c.dispatch_text_motion(TextMotion::Backspace);
        assert_eq!(c.mode(), Mode::Normal);
        assert_focus_invariant(&c);
    }

    #[test]
    fn test_text_motion_ignored_in_normal_mode() {
        let mut c = create_controller();
        c.dispatch_text_motion(TextMotion::Backspace);
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn test_empty_text_in_ex_reverts_when_buffer_empty() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        c.set_mode(Mode::Ex);
        c.dispatch_text(&mut host, "");
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn test_keys_in_ex_mode_do_not_reach_dispatcher() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":l");
        assert!(host.actions.is_empty());
        assert_eq!(c.command_line().text(), ":l");
    }

    #[test]
    fn test_ex_text_not_mirrored_to_keystrokes() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":abc");
        assert_eq!(c.keystrokes().tail(8), ":");
    }

    #[test]
    fn test_key_release_ignored_in_ex_mode() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        c.set_mode(Mode::Ex);
        c.dispatch_key_release(&mut host, Key::Char('l'), no_mods());
        assert!(host.actions.is_empty());
    }

    #[test]
    fn test_timer_expires_prefix() {
        let mut c = create_controller();
        *c.dispatcher_mut() = NormalDispatcher::default().with_prefix_timeout(2);
        let mut host = MockHost::default();
        type_char(&mut c, &mut host, 'm');
        c.timer_tick(&mut host, Duration::from_millis(50));
        c.timer_tick(&mut host, Duration::from_millis(50));
        assert_eq!(c.dispatcher().state(), DispatchState::Idle);
    }

    #[test]
    fn test_timer_tick_reaches_host_only_through_actions() {
        let mut c = create_controller();
        *c.dispatcher_mut() = NormalDispatcher::default().with_prefix_timeout(1);
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, "3g");
        c.timer_tick(&mut host, Duration::from_millis(50));
        assert!(host.actions.is_empty());
        assert_eq!(c.dispatcher().pending_multiplier(), None);

        // Ticks while idle are harmless
        c.timer_tick(&mut host, Duration::from_millis(50));
        type_char(&mut c, &mut host, 'l');
        assert_eq!(host.actions, vec![Action::new(NormalCommand::MoveRight, 1)]);
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn test_reentering_ex_clears_stale_text() {
        let mut c = create_controller();
        let mut host = MockHost::default();
        type_str(&mut c, &mut host, ":cmd");
        press(&mut c, &mut host, Key::Esc);
        assert_eq!(c.command_line().text(), ":cmd");

        type_char(&mut c, &mut host, ':');
        assert_eq!(c.command_line().text(), ":");
    }
}
