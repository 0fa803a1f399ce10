use plex_query_models::MediaItem;

/// Matches of one keyword search.
///
/// Single pass: items are handed out one at a time and the sequence cannot be
/// rewound or cloned. Iterating again after exhaustion yields nothing and never
/// re-queries the server. Call `collect()` to keep the items around.
#[derive(Debug)]
pub struct SearchResults {
    keyword: String,
    items: std::vec::IntoIter<MediaItem>,
}

impl SearchResults {
    pub(crate) fn new(keyword: String, items: Vec<MediaItem>) -> Self {
        Self {
            keyword,
            items: items.into_iter(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl Iterator for SearchResults {
    type Item = MediaItem;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for SearchResults {}

impl std::iter::FusedIterator for SearchResults {}
