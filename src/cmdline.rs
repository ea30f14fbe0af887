//! Command-line buffer for ex mode
//!
//! Holds the text typed after `:` plus a focus flag. Editing is delegated to
//! the tui-input crate; this type only adds focus and the "became empty"
//! rule the mode controller relies on.

use tui_input::{Input, InputRequest};

use crate::ex::{ExError, ExRegistry};
use crate::input::key::TextMotion;

pub struct CommandLine {
    /// Current text, including the leading marker
    input: Input,
    /// Whether the line currently accepts text
    focused: bool,
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLine")
            .field("text", &self.input.value())
            .field("cursor", &self.input.cursor())
            .field("focused", &self.focused)
            .finish()
    }
}

impl CommandLine {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            focused: false,
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Drop focus. The text stays until `clear` or `execute`.
    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// The underlying input, for rendering (scroll and visual cursor)
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    /// Insert text verbatim at the cursor
    pub fn on_text(&mut self, text: &str) {
        for c in text.chars() {
            self.input.handle(InputRequest::InsertChar(c));
        }
    }

    /// Apply a cursor motion or deletion. Deleting the last character drops
    /// focus; switching modes is left to the caller.
    pub fn on_text_motion(&mut self, motion: TextMotion) {
        let request = match motion {
            TextMotion::Left => InputRequest::GoToPrevChar,
            TextMotion::Right => InputRequest::GoToNextChar,
            TextMotion::WordLeft => InputRequest::GoToPrevWord,
            TextMotion::WordRight => InputRequest::GoToNextWord,
            TextMotion::Home => InputRequest::GoToStart,
            TextMotion::End => InputRequest::GoToEnd,
            TextMotion::Backspace => InputRequest::DeletePrevChar,
            TextMotion::Delete => InputRequest::DeleteNextChar,
            TextMotion::DeleteWordBackward => InputRequest::DeletePrevWord,
            TextMotion::DeleteLine => InputRequest::DeleteLine,
        };
        self.input.handle(request);

        if self.is_empty() {
            self.unfocus();
        }
    }

    /// Run the current text through `registry`, then clear the line whether
    /// or not the command succeeded.
    pub fn execute<C>(&mut self, registry: &ExRegistry<C>, ctx: &mut C) -> Result<(), ExError> {
        let result = registry.run(ctx, self.input.value());
        self.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ex::CommandError;

    fn line_with(text: &str) -> CommandLine {
        let mut line = CommandLine::new();
        line.focus();
        line.on_text(text);
        line
    }

    #[test]
    fn test_new_line_is_empty_and_unfocused() {
        let line = CommandLine::new();
        assert!(line.is_empty());
        assert!(!line.has_focus());
    }

    #[test]
    fn test_on_text_appends_verbatim() {
        let mut line = line_with(":set");
        line.on_text(" color ✓");
        assert_eq!(line.text(), ":set color ✓");
        assert_eq!(line.cursor(), 12);
    }

    #[test]
    fn test_unfocus_keeps_text() {
        let mut line = line_with(":marks");
        line.unfocus();
        assert!(!line.has_focus());
        assert_eq!(line.text(), ":marks");
    }

    #[test]
    fn test_backspace_deletes_previous_char() {
        let mut line = line_with(":ab");
        line.on_text_motion(TextMotion::Backspace);
        assert_eq!(line.text(), ":a");
        assert!(line.has_focus());
    }

    #[test]
    fn test_backspace_to_empty_drops_focus() {
        let mut line = line_with(":");
        line.on_text_motion(TextMotion::Backspace);
        assert!(line.is_empty());
        assert!(!line.has_focus());
    }

    #[test]
    fn test_motion_then_insert() {
        let mut line = line_with(":lne");
        line.on_text_motion(TextMotion::Left);
        line.on_text_motion(TextMotion::Left);
        line.on_text("i");
        assert_eq!(line.text(), ":line");
    }

    #[test]
    fn test_home_end() {
        let mut line = line_with(":here");
        line.on_text_motion(TextMotion::Home);
        assert_eq!(line.cursor(), 0);
        line.on_text_motion(TextMotion::End);
        assert_eq!(line.cursor(), 5);
    }

    #[test]
    fn test_delete_line_drops_focus() {
        let mut line = line_with(":set color 1 2 3 4");
        line.on_text_motion(TextMotion::DeleteLine);
        assert!(line.is_empty());
        assert!(!line.has_focus());
    }

    #[test]
    fn test_execute_clears_on_success() {
        let mut registry: ExRegistry<Vec<String>> = ExRegistry::new();
        registry.register("echo", |out: &mut Vec<String>, args: &[&str]| {
            out.push(args.join(" "));
            Ok(())
        });

        let mut out = Vec::new();
        let mut line = line_with(":echo hi there");
        line.execute(&registry, &mut out).unwrap();

        assert_eq!(out, vec!["hi there".to_string()]);
        assert!(line.is_empty());
    }

    #[test]
    fn test_execute_clears_on_failure() {
        let mut registry: ExRegistry<()> = ExRegistry::new();
        registry.register("bad", |_: &mut (), _: &[&str]| Err(CommandError::MissingOption));

        let mut line = line_with(":bad");
        assert!(line.execute(&registry, &mut ()).is_err());
        assert!(line.is_empty());

        let mut line = line_with(":nope");
        assert!(matches!(
            line.execute(&registry, &mut ()),
            Err(ExError::UnknownCommand(_))
        ));
        assert!(line.is_empty());
    }
}
