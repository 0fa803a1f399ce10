use async_trait::async_trait;
use plex_query_models::{ClientDevice, LibrarySectionInfo, MediaItem, ServerIdentity};
use crate::error::PlexError;

/// Which items of a section to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    Unwatched,
}

/// Read-only view of a media server.
///
/// Implementations hold no mutable state, so a shared reference may be used
/// from several tasks at once.
#[async_trait]
pub trait MediaServer: Send + Sync {
    fn identity(&self) -> &ServerIdentity;

    /// Playback devices currently connected, in server order
    async fn clients(&self) -> Result<Vec<ClientDevice>, PlexError>;

    /// Every library section configured on the server
    async fn sections(&self) -> Result<Vec<LibrarySectionInfo>, PlexError>;

    async fn section_items(
        &self,
        section: &LibrarySectionInfo,
        filter: ItemFilter,
    ) -> Result<Vec<MediaItem>, PlexError>;

    /// Global search across all sections. `query` is already validated as non-blank.
    async fn search(&self, query: &str) -> Result<Vec<MediaItem>, PlexError>;
}
