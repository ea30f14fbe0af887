//! Message log for command output and errors
//!
//! A ring buffer of lines shown under the canvas. `:marks` output and failed
//! ex commands land here instead of stdout, which the terminal UI owns.

use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of messages to keep
const MAX_LOG_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub level: Level,
    pub timestamp: Instant,
}

#[derive(Debug)]
pub struct MessageLog {
    /// Newest at back
    entries: VecDeque<Message>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, text: String, level: Level) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message {
            text,
            level,
            timestamp: Instant::now(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), Level::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), Level::Error);
    }

    /// Newest first
    pub fn recent_first(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
