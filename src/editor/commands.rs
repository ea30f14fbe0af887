//! Built-in ex commands
//!
//! - `:line a b` - segment from mark `a` to mark `b` in the current color
//! - `:marks` - list marks, sorted by name
//! - `:set color r g b a` / `:set gridcolor r g b a`
//! - `:here` - move the named square to the cursor
//! - `:q` / `:quit` - exit

use crate::coords::Rgba;
use crate::ex::{CommandError, CommandResult, ExRegistry};

use super::scene::{Segment, SQUARE};
use super::Editor;

/// A registry with every built-in command
pub fn registry() -> ExRegistry<Editor> {
    let mut registry = ExRegistry::new();
    registry.register("line", line);
    registry.register("marks", marks);
    registry.register("set", set);
    registry.register("here", here);
    registry.register("q", quit);
    registry.register("quit", quit);
    registry
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> CommandResult {
    if args.len() != expected {
        return Err(CommandError::WrongArgumentCount {
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn line(editor: &mut Editor, args: &[&str]) -> CommandResult {
    expect_args("line", args, 2)?;
    let start = editor.mark(args[0])?;
    let end = editor.mark(args[1])?;
    let color = editor.options.color;
    editor.scene_mut().add_segment(Segment { start, end, color });
    Ok(())
}

fn marks(editor: &mut Editor, _args: &[&str]) -> CommandResult {
    let listing: Vec<String> = editor
        .marks()
        .iter()
        .map(|(name, p)| format!("{} {}", name, p))
        .collect();
    for entry in listing {
        editor.messages.info(entry);
    }
    Ok(())
}

fn set(editor: &mut Editor, args: &[&str]) -> CommandResult {
    let Some((option, values)) = args.split_first() else {
        return Err(CommandError::MissingOption);
    };

    let target = match *option {
        "color" => &mut editor.options.color,
        "gridcolor" => &mut editor.options.gridcolor,
        other => return Err(CommandError::UnknownOption(other.to_string())),
    };

    if values.len() != 4 {
        return Err(CommandError::WrongArgumentCount {
            command: "set",
            expected: 5,
            got: args.len(),
        });
    }

    *target = Rgba::from_args(values).map_err(|e| CommandError::InvalidArgument {
        value: values.join(" "),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn here(editor: &mut Editor, args: &[&str]) -> CommandResult {
    expect_args("here", args, 0)?;
    let cursor = editor.cursor();
    if !editor.scene_mut().move_square(SQUARE, cursor) {
        return Err(CommandError::InvalidArgument {
            value: SQUARE.to_string(),
            reason: "no such shape".to_string(),
        });
    }
    Ok(())
}

fn quit(editor: &mut Editor, _args: &[&str]) -> CommandResult {
    editor.request_quit();
    Ok(())
}
