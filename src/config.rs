//! Persisted application settings
//!
//! Handles loading and saving of the JSON settings file at
//! `~/.config/swictl/config.json`: the swaymsg executable path, whether
//! safe mode is on, and how long safe mode waits before reverting
//! unconfirmed changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config directory name under the platform config dir
const CONFIG_DIR: &str = "swictl";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default safe-mode revert timeout in seconds
const DEFAULT_REVERT_TIMEOUT: f32 = 10.0;

/// Application section of the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Revert applied changes after `revert_timeout` unless confirmed
    #[serde(default = "default_true")]
    pub safe_mode: bool,

    /// swaymsg executable name or path
    #[serde(default = "default_swaymsg_path")]
    pub swaymsg_path: String,

    /// Seconds before safe mode reverts unconfirmed changes
    #[serde(default = "default_revert_timeout")]
    pub revert_timeout: f32,
}

fn default_true() -> bool {
    true
}

fn default_swaymsg_path() -> String {
    crate::ipc::DEFAULT_SWAYMSG.to_string()
}

fn default_revert_timeout() -> f32 {
    DEFAULT_REVERT_TIMEOUT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            safe_mode: true,
            swaymsg_path: default_swaymsg_path(),
            revert_timeout: DEFAULT_REVERT_TIMEOUT,
        }
    }
}

impl AppSettings {
    /// Clamp values a hand-edited file may have broken.
    pub fn validate(&mut self) {
        if !self.revert_timeout.is_finite() || self.revert_timeout < 0.0 {
            self.revert_timeout = DEFAULT_REVERT_TIMEOUT;
        }
        if self.swaymsg_path.is_empty() {
            self.swaymsg_path = default_swaymsg_path();
        }
    }
}

/// Top-level settings file structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Application settings
    #[serde(default)]
    pub app: AppSettings,

    /// Where this config was loaded from (not serialized)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// The default config directory path.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR))
    }

    /// The default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|p| p.join(CONFIG_FILE))
    }

    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_config_path() {
            Some(path) => Self::load(&path),
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a file path.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::IoError)?;
        let mut config: Config =
            serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;

        config.app.validate();
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            safe_mode = config.app.safe_mode,
            swaymsg = %config.app.swaymsg_path,
            revert_timeout = config.app.revert_timeout,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Save configuration to its file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = match &self.config_path {
            Some(p) => p.clone(),
            None => Self::default_config_path()
                .ok_or_else(|| ConfigError::ValidationError("No config path".to_string()))?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::ParseError)?;
        fs::write(&path, contents).map_err(ConfigError::IoError)?;

        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading/writing file
    IoError(std::io::Error),
    /// JSON parsing error
    ParseError(serde_json::Error),
    /// Validation error
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::ValidationError(_) => None,
        }
    }
}
