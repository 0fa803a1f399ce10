pub mod queries;
pub mod search;
pub mod section;

#[cfg(test)]
pub(crate) mod testing;

pub use queries::{get_library_section, list_clients, list_unwatched_movies, search_content, MOVIES_SECTION};
pub use search::SearchResults;
pub use section::LibrarySection;
