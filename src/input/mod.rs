//! Input handling for keyboard events
//!
//! This module is split into layers:
//! - `key` - platform-independent keys, modifiers and text motions
//! - `keymap` - what a normal-mode key means
//! - `dispatcher` - normal-mode sequencing (counts, prefixes, paired keys)
//! - `controller` - mode switching and routing between the above
//!
//! The functions here translate crossterm events into that vocabulary. A
//! printable key is delivered twice, as a key press and then as the text it
//! typed, the way windowing toolkits report keyboard input.

pub mod controller;
pub mod dispatcher;
pub mod key;
pub mod keymap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

use controller::Propagation;
use key::{Key, Modifiers, TextMotion};

/// Map a crossterm key code. Returns None for keys the editor never uses.
pub fn translate_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}

pub fn translate_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(
        Modifiers::META,
        mods.intersects(KeyModifiers::META | KeyModifiers::SUPER),
    );
    out
}

/// The text a key types, if any. Chords with Ctrl or Alt type nothing.
pub fn key_text(key: Key, mods: Modifiers) -> Option<String> {
    match key {
        Key::Char(c) if !mods.intersects(Modifiers::CTRL | Modifiers::ALT) => Some(c.to_string()),
        _ => None,
    }
}

/// Handle a keyboard event
/// Returns true if the app should quit
pub fn handle_key(event: KeyEvent, app: &mut App) -> bool {
    let Some(key) = translate_key(event.code) else {
        return app.should_quit();
    };
    let mods = translate_modifiers(event.modifiers);
    let App {
        controller, editor, ..
    } = app;

    match event.kind {
        KeyEventKind::Release => controller.dispatch_key_release(editor, key, mods),
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if controller.dispatch_key_press(editor, key, mods) == Propagation::Unhandled {
                if let Some(motion) = TextMotion::from_key(key, mods) {
                    controller.dispatch_text_motion(motion);
                } else if let Some(text) = key_text(key, mods) {
                    controller.dispatch_text(editor, &text);
                }
            }
        }
    }

    app.should_quit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::coords::Point;
    use crate::mode::Mode;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: mods,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_keys(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(press(KeyCode::Char(c), KeyModifiers::NONE), app);
        }
    }

    #[test]
    fn test_translate_modifiers() {
        let mods = translate_modifiers(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(mods, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(translate_modifiers(KeyModifiers::NONE), Modifiers::empty());
    }

    #[test]
    fn test_key_text() {
        assert_eq!(key_text(Key::Char('x'), Modifiers::SHIFT), Some("x".to_string()));
        assert_eq!(key_text(Key::Char('w'), Modifiers::CTRL), None);
        assert_eq!(key_text(Key::Enter, Modifiers::empty()), None);
    }

    #[test]
    fn test_count_and_motion() {
        let mut app = App::new(Config::default());
        type_keys(&mut app, "2l");
        assert_eq!(app.editor.cursor(), Point::new(360, 200));
        assert_eq!(app.controller.keystrokes().tail(16), "2l");
    }

    #[test]
    fn test_shifted_colon_enters_ex() {
        let mut app = App::new(Config::default());
        handle_key(press(KeyCode::Char(':'), KeyModifiers::SHIFT), &mut app);
        assert_eq!(app.controller.mode(), Mode::Ex);
        assert_eq!(app.controller.command_line().text(), ":");
    }

    #[test]
    fn test_ex_editing_and_quit() {
        let mut app = App::new(Config::default());
        type_keys(&mut app, ":qx");
        handle_key(press(KeyCode::Backspace, KeyModifiers::NONE), &mut app);
        assert_eq!(app.controller.command_line().text(), ":q");
        assert!(handle_key(press(KeyCode::Enter, KeyModifiers::NONE), &mut app));
    }

    #[test]
    fn test_ctrl_u_clears_line_and_leaves_ex() {
        let mut app = App::new(Config::default());
        type_keys(&mut app, ":set");
        handle_key(press(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut app);
        assert_eq!(app.controller.mode(), Mode::Normal);
    }

    #[test]
    fn test_release_does_nothing() {
        let mut app = App::new(Config::default());
        let mut event = press(KeyCode::Char('l'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        handle_key(event, &mut app);
        assert_eq!(app.editor.cursor(), Point::new(320, 200));
    }
}
