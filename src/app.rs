//! Application state
//!
//! The modal core and the editor sit side by side so the controller can hand
//! the editor to command handlers without a borrow of itself.

use std::time::Duration;

use crate::config::Config;
use crate::editor::{commands, Editor};
use crate::input::controller::ModeController;
use crate::input::dispatcher::NormalDispatcher;
use crate::input::keymap::Keymap;

pub struct App {
    pub controller: ModeController<Editor>,
    pub editor: Editor,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let dispatcher =
            NormalDispatcher::new(Keymap::default()).with_prefix_timeout(config.prefix_timeout_ticks);
        let controller = ModeController::new(commands::registry(), dispatcher);
        let editor = Editor::new(&config);

        tracing::info!(
            commands = ?controller.registry().names(),
            "editor ready"
        );

        Self {
            controller,
            editor,
            config,
        }
    }

    /// Timer period from the config
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms.max(1))
    }

    /// Advance timers by one tick
    pub fn tick(&mut self, delta: Duration) {
        let App {
            controller, editor, ..
        } = self;
        controller.timer_tick(editor, delta);
    }

    pub fn should_quit(&self) -> bool {
        self.editor.should_quit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::dispatcher::DispatchState;
    use crate::input::key::{Key, Modifiers};
    use crate::input::keymap::Prefix;

    #[test]
    fn test_prefix_timeout_from_config() {
        let config = Config {
            prefix_timeout_ticks: 3,
            ..Config::default()
        };
        let mut app = App::new(config);
        let App {
            controller, editor, ..
        } = &mut app;
        controller.dispatch_key_press(editor, Key::Char('g'), Modifiers::empty());
        assert_eq!(
            controller.dispatcher().state(),
            DispatchState::AwaitingPrefixContinuation(Prefix::Go)
        );

        for _ in 0..3 {
            app.tick(Duration::from_millis(50));
        }
        assert_eq!(app.controller.dispatcher().state(), DispatchState::Idle);
    }

    #[test]
    fn test_tick_interval_never_zero() {
        let app = App::new(Config {
            tick_interval_ms: 0,
            ..Config::default()
        });
        assert_eq!(app.tick_interval(), Duration::from_millis(1));
    }
}
