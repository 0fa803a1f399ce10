use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plex metadata type, as reported in the `type` field of a metadata entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
    Season,
    Episode,
    Artist,
    Album,
    Track,
    Photo,
    Collection,
    Other(String),
}

impl MediaKind {
    pub fn from_plex(type_: &str) -> Self {
        match type_ {
            "movie" => MediaKind::Movie,
            "show" => MediaKind::Show,
            "season" => MediaKind::Season,
            "episode" => MediaKind::Episode,
            "artist" => MediaKind::Artist,
            "album" => MediaKind::Album,
            "track" => MediaKind::Track,
            "photo" => MediaKind::Photo,
            "collection" => MediaKind::Collection,
            other => MediaKind::Other(other.to_string()),
        }
    }

    /// Numeric type code used by `/library/sections/{key}/all?type=`
    pub fn search_type(&self) -> Option<u8> {
        match self {
            MediaKind::Movie => Some(1),
            MediaKind::Show => Some(2),
            MediaKind::Season => Some(3),
            MediaKind::Episode => Some(4),
            MediaKind::Artist => Some(8),
            MediaKind::Album => Some(9),
            MediaKind::Track => Some(10),
            MediaKind::Photo => Some(13),
            MediaKind::Collection => Some(18),
            MediaKind::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "show",
            MediaKind::Season => "season",
            MediaKind::Episode => "episode",
            MediaKind::Artist => "artist",
            MediaKind::Album => "album",
            MediaKind::Track => "track",
            MediaKind::Photo => "photo",
            MediaKind::Collection => "collection",
            MediaKind::Other(other) => other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of library content as seen by this client. Never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub rating_key: String,
    /// Server path of the item, e.g. `/library/metadata/42`
    pub key: String,
    pub title: String,
    pub kind: MediaKind,
    pub year: Option<u32>,
    pub view_count: u32,
    /// Movies and episodes: played at least once. Shows and seasons: every episode played.
    pub watched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    /// Deep link into Plex Web for this item
    pub web_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(view_count: u32) -> MediaItem {
        MediaItem {
            rating_key: "42".to_string(),
            key: "/library/metadata/42".to_string(),
            title: "Heat".to_string(),
            kind: MediaKind::Movie,
            year: Some(1995),
            view_count,
            watched: view_count > 0,
            last_viewed_at: None,
            added_at: None,
            web_url: "https://app.plex.tv/desktop/#!/server/abc/details?key=%2Flibrary%2Fmetadata%2F42".to_string(),
        }
    }

    #[test]
    fn test_media_kind_from_plex() {
        assert_eq!(MediaKind::from_plex("movie"), MediaKind::Movie);
        assert_eq!(MediaKind::from_plex("episode"), MediaKind::Episode);
        assert_eq!(MediaKind::from_plex("clip"), MediaKind::Other("clip".to_string()));
    }

    #[test]
    fn test_search_type_codes() {
        assert_eq!(MediaKind::Movie.search_type(), Some(1));
        assert_eq!(MediaKind::Show.search_type(), Some(2));
        assert_eq!(MediaKind::Track.search_type(), Some(10));
        assert_eq!(MediaKind::Other("clip".to_string()).search_type(), None);
    }

    #[test]
    fn test_serialize_skips_missing_timestamps() {
        let json = serde_json::to_value(item(0)).unwrap();
        assert_eq!(json["title"], "Heat");
        assert_eq!(json["kind"], "movie");
        assert_eq!(json["watched"], false);
        assert!(json.get("last_viewed_at").is_none());
        assert!(json.get("added_at").is_none());
    }
}
