use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// User configuration, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides the location of the tasks database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub task_reminder_enabled: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            log_filter: default_log_filter(),
            task_reminder_enabled: false,
        }
    }
}

impl AppConfig {
    /// Returns the path to `config.toml`.
    ///
    /// `TASKTRACKER_CONFIG` wins over the platform config directory.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(p) = std::env::var("TASKTRACKER_CONFIG") {
            return Ok(PathBuf::from(p));
        }
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("tasktracker")
            .join("config.toml"))
    }

    /// Load config from `path`. Returns the default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).map_err(io_err)
    }
}
