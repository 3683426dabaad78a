use super::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, Config};
use crate::error::ConfigError;
use anyhow::Context;
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.wellness/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> anyhow::Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let wellness_dir = home.join(CONFIG_DIR_NAME);

        if !wellness_dir.exists() {
            fs::create_dir_all(&wellness_dir).context("Failed to create .wellness directory")?;
        }

        Self::load_from_path(&wellness_dir.join(CONFIG_FILE_NAME)).context("Failed to load config")
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| ConfigError::Load(format!("Failed to parse config file: {e}")))?;
            config.config_path = config_path.to_path_buf();
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("Failed to serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
