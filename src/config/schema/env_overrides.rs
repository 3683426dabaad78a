use super::Config;

pub const STORAGE_DIR_ENV: &str = "WELLNESS_STORAGE_DIR";
pub const LOG_LEVEL_ENV: &str = "WELLNESS_LOG_LEVEL";

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV)
            && !dir.trim().is_empty()
        {
            self.storage_dir = dir;
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV)
            && level.trim().parse::<tracing::Level>().is_ok()
        {
            self.log_level = level.trim().to_string();
        }
    }
}
