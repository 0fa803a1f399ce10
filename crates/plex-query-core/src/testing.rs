use async_trait::async_trait;
use plex_query_models::{ClientDevice, LibrarySectionInfo, MediaItem, MediaKind, ServerIdentity};
use plex_query_sources::plex::web::{item_web_url, section_web_url};
use plex_query_sources::{ItemFilter, MediaServer, PlexError};
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) const MACHINE: &str = "fake-machine";

/// In-memory server with a fixed catalog. Counts every call it answers.
pub(crate) struct FakeServer {
    identity: ServerIdentity,
    clients: Vec<ClientDevice>,
    sections: Vec<(LibrarySectionInfo, Vec<MediaItem>)>,
    requests: AtomicUsize,
}

impl FakeServer {
    pub(crate) fn new() -> Self {
        Self {
            identity: ServerIdentity {
                machine_identifier: MACHINE.to_string(),
                friendly_name: "Fake".to_string(),
                version: "1.0".to_string(),
            },
            clients: Vec::new(),
            sections: Vec::new(),
            requests: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_client(mut self, title: &str) -> Self {
        self.clients.push(ClientDevice {
            title: title.to_string(),
            machine_identifier: format!("client-{}", self.clients.len()),
            product: "Plex Web".to_string(),
            platform: None,
            host: None,
            address: None,
            port: None,
            protocol_version: None,
        });
        self
    }

    pub(crate) fn with_section(mut self, title: &str, kind: MediaKind, items: Vec<MediaItem>) -> Self {
        let key = (self.sections.len() + 1).to_string();
        self.sections.push((
            LibrarySectionInfo {
                web_url: section_web_url(MACHINE, &key),
                key,
                title: title.to_string(),
                kind,
            },
            items,
        ));
        self
    }

    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn movie(rating_key: u32, title: &str, view_count: u32) -> MediaItem {
    let key = format!("/library/metadata/{}", rating_key);
    MediaItem {
        rating_key: rating_key.to_string(),
        web_url: item_web_url(MACHINE, &key),
        key,
        title: title.to_string(),
        kind: MediaKind::Movie,
        year: None,
        view_count,
        watched: view_count > 0,
        last_viewed_at: None,
        added_at: None,
    }
}

#[async_trait]
impl MediaServer for FakeServer {
    fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    async fn clients(&self) -> Result<Vec<ClientDevice>, PlexError> {
        self.record();
        Ok(self.clients.clone())
    }

    async fn sections(&self) -> Result<Vec<LibrarySectionInfo>, PlexError> {
        self.record();
        Ok(self.sections.iter().map(|(info, _)| info.clone()).collect())
    }

    async fn section_items(
        &self,
        section: &LibrarySectionInfo,
        filter: ItemFilter,
    ) -> Result<Vec<MediaItem>, PlexError> {
        self.record();
        let (_, items) = self
            .sections
            .iter()
            .find(|(info, _)| info.key == section.key)
            .ok_or_else(|| PlexError::NotFound {
                section: section.title.clone(),
            })?;
        Ok(items
            .iter()
            .filter(|item| filter == ItemFilter::All || !item.watched)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<MediaItem>, PlexError> {
        self.record();
        let needle = query.to_lowercase();
        Ok(self
            .sections
            .iter()
            .flat_map(|(_, items)| items.iter())
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
