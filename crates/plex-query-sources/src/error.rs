use plex_query_config::ConfigurationError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlexError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("could not connect to Plex server at {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Plex server rejected the access token")]
    Unauthorized,

    #[error("library section '{section}' not found")]
    NotFound { section: String },

    #[error("search keyword must not be empty")]
    InvalidKeyword,

    #[error("Plex request {path} failed with status {status}")]
    Http { status: StatusCode, path: String },

    #[error("Plex request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected Plex response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl PlexError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlexError::NotFound { .. })
    }

    /// Server unreachable or credentials refused
    pub fn is_connection(&self) -> bool {
        matches!(self, PlexError::Connection { .. } | PlexError::Unauthorized)
    }
}
