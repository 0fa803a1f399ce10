use crate::error::PlexError;
use crate::traits::ItemFilter;
use crate::plex::web::{item_web_url, section_web_url};
use chrono::{DateTime, TimeZone, Utc};
use plex_query_config::{ConfigurationError, TOKEN_VAR};
use plex_query_models::{ClientDevice, LibrarySectionInfo, MediaItem, MediaKind, ServerIdentity};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const CLIENT_IDENTIFIER: &str = "plex-query-cli";
const PRODUCT: &str = "plex-query";

#[derive(Debug, Deserialize)]
struct ClientsResponse {
    #[serde(rename = "MediaContainer")]
    media_container: ClientsContainer,
}

#[derive(Debug, Deserialize)]
struct ClientsContainer {
    #[serde(rename = "Server", default)]
    server: Vec<ClientEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    machine_identifier: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    product: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    host: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    address: Option<String>,
    #[serde(default, deserialize_with = "lenient_port")]
    port: Option<u16>,
    #[serde(default, deserialize_with = "lenient_string")]
    protocol_version: Option<String>,
}

impl From<ClientEntry> for ClientDevice {
    fn from(entry: ClientEntry) -> Self {
        ClientDevice {
            title: entry.name.unwrap_or_default(),
            machine_identifier: entry.machine_identifier.unwrap_or_default(),
            product: entry.product.unwrap_or_default(),
            platform: entry.platform,
            host: entry.host,
            address: entry.address,
            port: entry.port,
            protocol_version: entry.protocol_version,
        }
    }
}

/// Client attributes arrive as strings or numbers depending on the player
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Thin typed layer over the Plex Media Server HTTP API
pub struct PlexHttpClient {
    client: Client,
    base_url: String,
}

impl PlexHttpClient {
    pub fn new(base_url: &str, token: &str, timeout: Option<Duration>) -> Result<Self, PlexError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token_value = HeaderValue::from_str(token).map_err(|e| {
            ConfigurationError::Invalid {
                key: TOKEN_VAR,
                reason: e.to_string(),
            }
        })?;
        token_value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-plex-token"), token_value);
        headers.insert(
            HeaderName::from_static("x-plex-client-identifier"),
            HeaderValue::from_static(CLIENT_IDENTIFIER),
        );
        headers.insert(
            HeaderName::from_static("x-plex-product"),
            HeaderValue::from_static(PRODUCT),
        );
        headers.insert(
            HeaderName::from_static("x-plex-version"),
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a server path and decode the JSON body
    pub async fn get_json(&self, path: &str) -> Result<Value, PlexError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Plex GET {}", path);

        let response = self.client.get(&url).send().await?;
        check_status(response.status(), path)?;

        response.json::<Value>().await.map_err(|e| PlexError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn get_identity(&self) -> Result<ServerIdentity, PlexError> {
        let json = self.get_json("/").await?;
        parse_identity(&json).ok_or_else(|| PlexError::Decode {
            path: "/".to_string(),
            reason: "missing MediaContainer.machineIdentifier".to_string(),
        })
    }

    pub async fn get_clients(&self) -> Result<Vec<ClientDevice>, PlexError> {
        let json = self.get_json("/clients").await?;
        let clients = parse_clients(json).map_err(|e| PlexError::Decode {
            path: "/clients".to_string(),
            reason: e.to_string(),
        })?;
        debug!("Plex clients: {} connected", clients.len());
        Ok(clients)
    }

    pub async fn get_libraries(&self, machine_identifier: &str) -> Result<Vec<LibrarySectionInfo>, PlexError> {
        let json = self.get_json("/library/sections").await?;
        let sections = parse_sections(&json, machine_identifier);
        debug!("Plex libraries: found {} sections", sections.len());
        Ok(sections)
    }

    pub async fn get_section_items(
        &self,
        section: &LibrarySectionInfo,
        filter: ItemFilter,
        machine_identifier: &str,
    ) -> Result<Vec<MediaItem>, PlexError> {
        let path = section_items_path(section, filter);
        let json = self.get_json(&path).await?;
        let items = parse_metadata_list(&json, machine_identifier);
        debug!(
            "Plex section '{}' ({:?}): {} items",
            section.title,
            filter,
            items.len()
        );
        Ok(items)
    }

    pub async fn search_hubs(&self, query: &str, machine_identifier: &str) -> Result<Vec<MediaItem>, PlexError> {
        let path = search_path(query);
        let json = self.get_json(&path).await?;
        let items = parse_hub_search(&json, machine_identifier);
        debug!("Plex search '{}': {} matches", query, items.len());
        Ok(items)
    }
}

/// 401 means the token was rejected; any other non-2xx keeps its status
pub(crate) fn check_status(status: StatusCode, path: &str) -> Result<(), PlexError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(PlexError::Unauthorized);
    }
    if !status.is_success() {
        return Err(PlexError::Http {
            status,
            path: path.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn search_path(query: &str) -> String {
    format!(
        "/hubs/search?query={}&includeCollections=1&includeExternalMedia=1",
        urlencoding::encode(query)
    )
}

pub(crate) fn section_items_path(section: &LibrarySectionInfo, filter: ItemFilter) -> String {
    let mut params = Vec::new();
    if let Some(type_code) = section.kind.search_type() {
        params.push(format!("type={}", type_code));
    }
    if filter == ItemFilter::Unwatched {
        params.push("unwatched=1".to_string());
    }

    let base = format!("/library/sections/{}/all", urlencoding::encode(&section.key));
    if params.is_empty() {
        base
    } else {
        format!("{}?{}", base, params.join("&"))
    }
}

fn media_container(json: &Value) -> Option<&Value> {
    json.get("MediaContainer")
}

/// Plex sends most identifiers as strings but a few builds send numbers
fn string_field(item: &Value, field: &str) -> Option<String> {
    match item.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn u32_field(item: &Value, field: &str) -> Option<u32> {
    item.get(field)
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .and_then(|v| u32::try_from(v).ok())
}

fn parse_timestamp(timestamp: Option<&Value>) -> Option<DateTime<Utc>> {
    timestamp
        .and_then(|t| t.as_i64())
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
}

pub(crate) fn parse_identity(json: &Value) -> Option<ServerIdentity> {
    let container = media_container(json)?;
    let machine_identifier = string_field(container, "machineIdentifier")?;
    if machine_identifier.is_empty() {
        return None;
    }
    Some(ServerIdentity {
        machine_identifier,
        friendly_name: string_field(container, "friendlyName").unwrap_or_default(),
        version: string_field(container, "version").unwrap_or_default(),
    })
}

pub(crate) fn parse_clients(json: Value) -> Result<Vec<ClientDevice>, serde_json::Error> {
    let response: ClientsResponse = serde_json::from_value(json)?;
    Ok(response
        .media_container
        .server
        .into_iter()
        .map(ClientDevice::from)
        .collect())
}

pub(crate) fn parse_sections(json: &Value, machine_identifier: &str) -> Vec<LibrarySectionInfo> {
    let Some(dirs) = media_container(json)
        .and_then(|mc| mc.get("Directory"))
        .and_then(|d| d.as_array())
    else {
        debug!("Plex libraries: no Directory array in response");
        return Vec::new();
    };

    dirs.iter()
        .filter_map(|dir| {
            let key = string_field(dir, "key")?;
            let title = string_field(dir, "title").unwrap_or_default();
            let kind = MediaKind::from_plex(dir.get("type").and_then(|t| t.as_str()).unwrap_or(""));
            Some(LibrarySectionInfo {
                web_url: section_web_url(machine_identifier, &key),
                key,
                title,
                kind,
            })
        })
        .collect()
}

pub(crate) fn parse_metadata_item(item: &Value, machine_identifier: &str) -> Option<MediaItem> {
    let rating_key = string_field(item, "ratingKey")?;
    let title = string_field(item, "title")?;
    let key = string_field(item, "key")
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| format!("/library/metadata/{}", rating_key));
    let kind = MediaKind::from_plex(item.get("type").and_then(|t| t.as_str()).unwrap_or(""));
    let view_count = u32_field(item, "viewCount").unwrap_or(0);

    // Containers report progress through their leaves
    let watched = match u32_field(item, "leafCount") {
        Some(leaves) if leaves > 0 => u32_field(item, "viewedLeafCount").unwrap_or(0) >= leaves,
        Some(_) => false,
        None => view_count > 0,
    };

    // Web links point at the item itself, not at its children listing
    let detail_key = key.trim_end_matches("/children").to_string();

    Some(MediaItem {
        web_url: item_web_url(machine_identifier, &detail_key),
        rating_key,
        key,
        title,
        kind,
        year: u32_field(item, "year"),
        view_count,
        watched,
        last_viewed_at: parse_timestamp(item.get("lastViewedAt")),
        added_at: parse_timestamp(item.get("addedAt")),
    })
}

fn parse_metadata_array(metadata: &[Value], machine_identifier: &str, context: &str) -> Vec<MediaItem> {
    let mut items = Vec::with_capacity(metadata.len());
    let mut skipped = 0;
    for (idx, entry) in metadata.iter().enumerate() {
        match parse_metadata_item(entry, machine_identifier) {
            Some(item) => items.push(item),
            None => {
                skipped += 1;
                if skipped <= 3 {
                    debug!("Plex {}: skipped entry[{}] without ratingKey or title", context, idx);
                }
            }
        }
    }
    if skipped > 0 {
        debug!("Plex {}: skipped {} entries that couldn't be parsed", context, skipped);
    }
    items
}

pub(crate) fn parse_metadata_list(json: &Value, machine_identifier: &str) -> Vec<MediaItem> {
    match media_container(json)
        .and_then(|mc| mc.get("Metadata"))
        .and_then(|m| m.as_array())
    {
        Some(metadata) => parse_metadata_array(metadata, machine_identifier, "section items"),
        None => Vec::new(),
    }
}

/// Flatten `MediaContainer.Hub[].Metadata[]` in hub order. Tag hubs (actors,
/// genres) carry `Directory` entries instead and contribute nothing.
pub(crate) fn parse_hub_search(json: &Value, machine_identifier: &str) -> Vec<MediaItem> {
    let Some(hubs) = media_container(json)
        .and_then(|mc| mc.get("Hub"))
        .and_then(|h| h.as_array())
    else {
        return Vec::new();
    };

    hubs.iter()
        .filter_map(|hub| hub.get("Metadata").and_then(|m| m.as_array()))
        .flat_map(|metadata| parse_metadata_array(metadata, machine_identifier, "search"))
        .collect()
}
