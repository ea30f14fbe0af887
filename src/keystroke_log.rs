//! Keystroke log for showing recently typed keys
//!
//! A ring buffer of text fragments (typed characters, `^[` for escape). The
//! log is write-only for the modal core and independent of all other state;
//! the status line reads it back for display.

use std::collections::VecDeque;

/// Maximum number of fragments to keep
const MAX_LOG_SIZE: usize = 64;

/// Recently typed keys, oldest first
#[derive(Debug, Clone)]
pub struct KeystrokeLog {
    /// Ring buffer of fragments (newest at back)
    fragments: VecDeque<String>,

    /// Maximum number of fragments
    capacity: usize,
}

impl Default for KeystrokeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl KeystrokeLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fragments: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a fragment, evicting the oldest when full
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.fragments.len() >= self.capacity {
            self.fragments.pop_front();
        }
        self.fragments.push_back(text.to_string());
    }

    /// The last `width` characters of the log, for a fixed-width display
    pub fn tail(&self, width: usize) -> String {
        let mut out: Vec<char> = Vec::new();
        for fragment in self.fragments.iter().rev() {
            for c in fragment.chars().rev() {
                if out.len() == width {
                    return out.into_iter().rev().collect();
                }
                out.push(c);
            }
        }
        out.into_iter().rev().collect()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log = KeystrokeLog::new();
        assert!(log.is_empty());
        assert_eq!(log.tail(10), "");
    }

    #[test]
    fn test_push_and_tail() {
        let mut log = KeystrokeLog::new();
        log.push_text("2");
        log.push_text("l");
        log.push_text("^[");
        assert_eq!(log.len(), 3);
        assert_eq!(log.tail(10), "2l^[");
    }

    #[test]
    fn test_tail_truncates_from_the_left() {
        let mut log = KeystrokeLog::new();
        for c in ["a", "b", "^[", "c"] {
            log.push_text(c);
        }
        assert_eq!(log.tail(3), "^[c");
        assert_eq!(log.tail(2), "[c");
    }

    #[test]
    fn test_capacity_limit() {
        let mut log = KeystrokeLog::with_capacity(3);
        for c in ["a", "b", "c", "d"] {
            log.push_text(c);
        }
        assert_eq!(log.len(), 3);
        let fragments: Vec<_> = log.fragments().collect();
        assert_eq!(fragments, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_tail_wider_than_log() {
        let mut log = KeystrokeLog::new();
        log.push_text("m");
        log.push_text(":");
        assert_eq!(log.tail(usize::MAX), "m:");
    }

    #[test]
    fn test_empty_fragment_ignored() {
        let mut log = KeystrokeLog::new();
        log.push_text("");
        assert!(log.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut log = KeystrokeLog::new();
        log.push_text("x");
        log.clear();
        assert!(log.is_empty());
    }
}
