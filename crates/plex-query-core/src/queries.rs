use crate::search::SearchResults;
use crate::section::LibrarySection;
use plex_query_models::ClientDevice;
use plex_query_sources::{MediaServer, PlexError};
use tracing::{debug, warn};

/// Section queried by `list_unwatched_movies`
pub const MOVIES_SECTION: &str = "Movies";

/// Playback devices connected to the server, in the order it reports them
pub async fn list_clients<S>(server: &S) -> Result<Vec<ClientDevice>, PlexError>
where
    S: MediaServer + ?Sized,
{
    server.clients().await
}

/// Titles of the unwatched items in the "Movies" section
pub async fn list_unwatched_movies<S>(server: &S) -> Result<Vec<String>, PlexError>
where
    S: MediaServer + ?Sized,
{
    let section = get_library_section(server, MOVIES_SECTION).await?;
    let items = section.search_unwatched().await?;
    Ok(items.into_iter().map(|item| item.title).collect())
}

/// Search all library content for `keyword`.
///
/// The request is made here; the returned sequence hands the matches out one
/// at a time. A blank keyword is rejected without contacting the server.
pub async fn search_content<S>(server: &S, keyword: &str) -> Result<SearchResults, PlexError>
where
    S: MediaServer + ?Sized,
{
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(PlexError::InvalidKeyword);
    }

    let items = server.search(keyword).await?;
    Ok(SearchResults::new(keyword.to_string(), items))
}

/// Resolve a section by its exact title
pub async fn get_library_section<'a, S>(server: &'a S, name: &str) -> Result<LibrarySection<'a, S>, PlexError>
where
    S: MediaServer + ?Sized,
{
    let sections = server.sections().await?;
    if let Some(info) = sections.iter().find(|section| section.title == name) {
        debug!("Resolved library section '{}' to key {}", name, info.key);
        return Ok(LibrarySection::new(server, info.clone()));
    }

    let available: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    warn!("Library section '{}' not found; available: {:?}", name, available);
    Err(PlexError::NotFound {
        section: name.to_string(),
    })
}
