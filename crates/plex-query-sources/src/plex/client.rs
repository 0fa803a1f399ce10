use crate::error::PlexError;
use crate::plex::api::PlexHttpClient;
use crate::plex::auth::verify_server;
use crate::traits::{ItemFilter, MediaServer};
use async_trait::async_trait;
use plex_query_config::Config;
use plex_query_models::{ClientDevice, LibrarySectionInfo, MediaItem, ServerIdentity};
use tracing::info;

/// Authenticated session with one Plex Media Server.
///
/// Built once per run and borrowed by every query. Nothing inside changes
/// after `connect` returns.
pub struct PlexServer {
    api: PlexHttpClient,
    identity: ServerIdentity,
}

impl PlexServer {
    /// Connect eagerly: the server root is fetched before this returns.
    pub async fn connect(config: &Config) -> Result<Self, PlexError> {
        let api = PlexHttpClient::new(&config.base_url, &config.token, config.timeout)?;
        let identity = verify_server(&api).await?;

        info!(
            "Connected to Plex server '{}' (version {}) at {}",
            identity.friendly_name,
            identity.version,
            api.base_url()
        );
        Ok(Self { api, identity })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

#[async_trait]
impl MediaServer for PlexServer {
    fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    async fn clients(&self) -> Result<Vec<ClientDevice>, PlexError> {
        self.api.get_clients().await
    }

    async fn sections(&self) -> Result<Vec<LibrarySectionInfo>, PlexError> {
        self.api.get_libraries(&self.identity.machine_identifier).await
    }

    async fn section_items(
        &self,
        section: &LibrarySectionInfo,
        filter: ItemFilter,
    ) -> Result<Vec<MediaItem>, PlexError> {
        self.api
            .get_section_items(section, filter, &self.identity.machine_identifier)
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<MediaItem>, PlexError> {
        self.api
            .search_hubs(query, &self.identity.machine_identifier)
            .await
    }
}
