use dirs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_VAR: &str = "PLEX_QUERY_CONFIG";

/// Explicit config file location from the environment, if any
pub fn config_file_override() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Option<Self> {
        let config_dir = dirs::config_dir()?.join("plex-query");
        Some(Self { config_dir })
    }

    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}
