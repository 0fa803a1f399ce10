/// Plex Web entry point used for deep links
pub const PLEX_WEB_BASE_URL: &str = "https://app.plex.tv/desktop/";

/// Deep link to an item's details page, e.g. for key `/library/metadata/42`
pub fn item_web_url(machine_identifier: &str, key: &str) -> String {
    format!(
        "{}#!/server/{}/details?key={}",
        PLEX_WEB_BASE_URL,
        machine_identifier,
        urlencoding::encode(key)
    )
}

/// Deep link to a library section's browse page
pub fn section_web_url(machine_identifier: &str, section_key: &str) -> String {
    format!(
        "{}#!/media/{}/com.plexapp.plugins.library?source={}",
        PLEX_WEB_BASE_URL,
        machine_identifier,
        urlencoding::encode(section_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_web_url_encodes_key() {
        assert_eq!(
            item_web_url("abc123", "/library/metadata/42"),
            "https://app.plex.tv/desktop/#!/server/abc123/details?key=%2Flibrary%2Fmetadata%2F42"
        );
    }

    #[test]
    fn test_section_web_url() {
        assert_eq!(
            section_web_url("abc123", "1"),
            "https://app.plex.tv/desktop/#!/media/abc123/com.plexapp.plugins.library?source=1"
        );
    }
}
