pub mod config;
pub mod error;
pub mod paths;

pub use config::{mask_secret, Config, FileConfig, BASE_URL_VAR, TOKEN_VAR};
pub use error::ConfigurationError;
pub use paths::{config_file_override, PathManager, CONFIG_PATH_VAR};
