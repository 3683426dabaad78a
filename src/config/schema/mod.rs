mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

pub const CONFIG_DIR_NAME: &str = ".wellness";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_SERVER_NAME: &str = "Wellness-Companion";
const DEFAULT_INSTRUCTIONS: &str = "Guide the user through a short daily check-in. \
Record each answer with set_checkin_field, then save_checkin or finalize_checkin. \
Use summary and get_history to reflect on trends.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where this config was loaded from (not persisted).
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Storage root for history, tasks and snapshots. Relative paths
    /// resolve against the working directory.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Identity advertised to agents on `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_instructions")]
    pub instructions: String,
}

fn default_storage_dir() -> String {
    "wellness".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.into()
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            instructions: default_instructions(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            storage_dir: default_storage_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// `storage_dir` with a leading `~` expanded.
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(self.storage_dir.trim()).to_string())
    }

    pub fn tracing_level(&self) -> Result<Level, ConfigError> {
        self.log_level.trim().parse::<Level>().map_err(|_| {
            ConfigError::Validation(format!(
                "log_level '{}' is not one of trace, debug, info, warn, error",
                self.log_level
            ))
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage_dir must not be empty".into(),
            ));
        }
        if self.server.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.name must not be empty".into(),
            ));
        }
        self.tracing_level().map(|_| ())
    }
}
