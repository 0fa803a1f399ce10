use crate::error::ConfigurationError;
use crate::paths::{config_file_override, PathManager};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const BASE_URL_VAR: &str = "BASE_URL";
pub const TOKEN_VAR: &str = "TOKEN";

/// Optional on-disk configuration. Every key can be overridden by the environment.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigurationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Connection settings for one Plex server
#[derive(Clone)]
pub struct Config {
    /// Server address without a trailing slash
    pub base_url: String,
    pub token: String,
    /// Request timeout; `None` leaves the HTTP client default in place
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &mask_secret(&self.token))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load from `.env`, the optional config file and the process environment.
    ///
    /// No network access happens here, so a missing value always fails before
    /// any connection attempt.
    pub fn load() -> Result<Self, ConfigurationError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {}", e),
        }

        let file = if let Some(path) = config_file_override() {
            // An explicit path must exist
            Some(FileConfig::load_from_file(&path)?)
        } else {
            match PathManager::new().map(|paths| paths.config_file()) {
                Some(path) if path.exists() => {
                    debug!("Reading config file {}", path.display());
                    Some(FileConfig::load_from_file(&path)?)
                }
                _ => None,
            }
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with looked-up environment values. The environment wins;
    /// blank values count as unset.
    pub fn resolve<F>(file: Option<FileConfig>, lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();

        let base_url = non_blank(lookup(BASE_URL_VAR))
            .or_else(|| non_blank(file.base_url))
            .ok_or(ConfigurationError::Missing(BASE_URL_VAR))?;
        let token = non_blank(lookup(TOKEN_VAR))
            .or_else(|| non_blank(file.token))
            .ok_or(ConfigurationError::Missing(TOKEN_VAR))?;

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigurationError::Invalid {
                key: BASE_URL_VAR,
                reason: format!("'{}' must start with http:// or https://", base_url),
            });
        }

        let timeout = match file.timeout_secs {
            Some(0) => {
                return Err(ConfigurationError::Invalid {
                    key: "timeout_secs",
                    reason: "must be greater than zero".to_string(),
                })
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Show only the first four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
