use plex_query_models::{LibrarySectionInfo, MediaItem};
use plex_query_sources::{ItemFilter, MediaServer, PlexError};

/// Handle to one library section, borrowed from the server session
pub struct LibrarySection<'a, S: MediaServer + ?Sized> {
    server: &'a S,
    info: LibrarySectionInfo,
}

impl<'a, S: MediaServer + ?Sized> LibrarySection<'a, S> {
    pub(crate) fn new(server: &'a S, info: LibrarySectionInfo) -> Self {
        Self { server, info }
    }

    pub fn info(&self) -> &LibrarySectionInfo {
        &self.info
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    pub fn web_url(&self) -> &str {
        &self.info.web_url
    }

    /// Every item in the section, each carrying its web URL
    pub async fn all(&self) -> Result<Vec<MediaItem>, PlexError> {
        self.server.section_items(&self.info, ItemFilter::All).await
    }

    pub async fn search_unwatched(&self) -> Result<Vec<MediaItem>, PlexError> {
        self.server
            .section_items(&self.info, ItemFilter::Unwatched)
            .await
    }
}
