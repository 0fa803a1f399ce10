use serde::{Deserialize, Serialize};
use crate::media::MediaKind;

/// Library section as listed by `/library/sections`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibrarySectionInfo {
    pub key: String,
    pub title: String,
    pub kind: MediaKind,
    /// Deep link into Plex Web for the section
    pub web_url: String,
}
