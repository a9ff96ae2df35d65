use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, MAX_CONNECTED_MINUTES};
use crate::ui::theme::Theme;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/pty-terminal/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pty-terminal").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Sidebar ratio is in (0, 1]
    /// - Tick rate, scrollback limit and pty size are non-zero
    /// - Every user has a name
    /// - Every theme colour parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.ui.sidebar_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(invalid(format!(
                "ui.sidebar_ratio must be in (0, 1], got {ratio}"
            )));
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(invalid("ui.tick_rate_ms must be greater than 0"));
        }

        if self.ui.scrollback_limit == Some(0) {
            return Err(invalid("ui.scrollback_limit must be greater than 0"));
        }

        if self.pty.rows == 0 || self.pty.cols == 0 {
            return Err(invalid(format!(
                "pty size must be non-zero, got {}x{}",
                self.pty.rows, self.pty.cols
            )));
        }

        if let Some(index) = self.users.iter().position(|u| u.name.trim().is_empty()) {
            return Err(invalid(format!("users[{index}] has an empty name")));
        }
        if let Some(index) = self
            .users
            .iter()
            .position(|u| !(0..=MAX_CONNECTED_MINUTES).contains(&u.connected_minutes_ago))
        {
            return Err(invalid(format!(
                "users[{index}].connected_minutes_ago must be between 0 and {MAX_CONNECTED_MINUTES}"
            )));
        }

        Theme::try_from(&self.theme)?;
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
