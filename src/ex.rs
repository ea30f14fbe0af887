//! Ex command registry
//!
//! Maps a command name to a handler. A command line such as `:line a b` is
//! split on whitespace; the first token picks the handler and the rest are
//! passed to it as string arguments.
//!
//! The registry is generic over the context handlers act on, so the editor
//! owns one registry instance instead of sharing process-wide state.

use std::collections::HashMap;
use std::fmt;

/// Leading marker stripped from a command line before tokenizing
pub const COMMAND_MARKER: char = ':';

/// Failures reported by a handler
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{command} requires {expected} argument(s), got {got}")]
    WrongArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("mark '{0}' is not set")]
    UndefinedMark(String),

    #[error("invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },

    #[error("no option specified")]
    MissingOption,

    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Failures from running a command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExError {
    #[error("unable to find command {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result type returned by ex handlers
pub type CommandResult = Result<(), CommandError>;

type Handler<C> = Box<dyn Fn(&mut C, &[&str]) -> CommandResult>;

/// Name → handler table for ex commands
pub struct ExRegistry<C> {
    commands: HashMap<String, Handler<C>>,
}

impl<C> Default for ExRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ExRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

impl<C> ExRegistry<C> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a handler. A later registration under the same name replaces
    /// the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut C, &[&str]) -> CommandResult + 'static,
    {
        self.commands.insert(name.into(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run a command line against `ctx`.
    ///
    /// A line with no command name (just the marker) does nothing. Handler
    /// errors come back unchanged, wrapped in `ExError::Command`.
    pub fn run(&self, ctx: &mut C, command_line: &str) -> Result<(), ExError> {
        let line = command_line
            .strip_prefix(COMMAND_MARKER)
            .unwrap_or(command_line);
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some((name, args)) = tokens.split_first() else {
            return Ok(());
        };

        let handler = self
            .commands
            .get(*name)
            .ok_or_else(|| ExError::UnknownCommand((*name).to_string()))?;

        tracing::debug!(command = *name, ?args, "running ex command");
        handler(ctx, args)?;
        Ok(())
    }
}
