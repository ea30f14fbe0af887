//! User configuration
//!
//! Read once at startup from `~/.config/victor/config.json` (or `--config`).
//! Every field is optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coords::{CanvasSize, Rgba};
use crate::editor::grid::DEFAULT_SCALE_INDEX;
use crate::input::dispatcher::DEFAULT_PREFIX_TIMEOUT_TICKS;

const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "victor.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Drawing color for new lines and paths
    pub color: Rgba,
    pub gridcolor: Rgba,
    /// Timer period; prefix timeouts are counted in these ticks
    pub tick_interval_ms: u64,
    pub prefix_timeout_ticks: u32,
    /// Characters of recent keystrokes shown in the status line
    pub keystroke_log_width: usize,
    /// Index into the grid scale table
    pub grid_scale: usize,
    pub canvas: CanvasSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            gridcolor: Rgba([0, 0, 255, 50]),
            tick_interval_ms: 50,
            prefix_timeout_ticks: DEFAULT_PREFIX_TIMEOUT_TICKS,
            keystroke_log_width: 16,
            grid_scale: DEFAULT_SCALE_INDEX,
            canvas: CanvasSize::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the config directory path (~/.config/victor)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("victor")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

pub fn default_log_path() -> PathBuf {
    config_dir().join(LOG_FILE_NAME)
}

impl Config {
    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load(&default_config_path()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
