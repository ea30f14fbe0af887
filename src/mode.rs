//! Top-level editor mode.
//!
//! The editor is always in exactly one mode. Normal mode interprets keys as
//! commands; ex mode collects a command line.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Ex,
}

impl Mode {
    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Ex => "EX",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Mode::Normal)
    }

    pub fn is_ex(&self) -> bool {
        matches!(self, Mode::Ex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
        assert!(Mode::default().is_normal());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Mode::Normal.as_str(), "NORMAL");
        assert_eq!(Mode::Ex.as_str(), "EX");
        assert!(Mode::Ex.is_ex());
    }
}
