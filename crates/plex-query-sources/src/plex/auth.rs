use crate::error::PlexError;
use crate::plex::api::PlexHttpClient;
use plex_query_models::ServerIdentity;
use tracing::debug;

/// Read the server identity, proving both reachability and token validity.
///
/// Transport failures and unexpected statuses become `PlexError::Connection`;
/// a 401 stays `PlexError::Unauthorized`.
pub async fn verify_server(api: &PlexHttpClient) -> Result<ServerIdentity, PlexError> {
    let url = api.base_url().to_string();
    debug!("Plex: verifying server at {}", url);

    api.get_identity().await.map_err(|e| connect_error(url, e))
}

pub(crate) fn connect_error(url: String, err: PlexError) -> PlexError {
    match err {
        PlexError::Request(err) => PlexError::Connection {
            url,
            reason: err.to_string(),
        },
        PlexError::Http { status, .. } => PlexError::Connection {
            url,
            reason: format!("server responded with {}", status),
        },
        PlexError::Decode { reason, .. } => PlexError::Connection {
            url,
            reason: format!("not a Plex Media Server ({})", reason),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    const URL: &str = "http://plex:32400";

    #[test]
    fn test_connect_error_http_status() {
        let err = connect_error(
            URL.to_string(),
            PlexError::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                path: "/".to_string(),
            },
        );
        match err {
            PlexError::Connection { url, reason } => {
                assert_eq!(url, URL);
                assert_eq!(reason, "server responded with 503 Service Unavailable");
            }
            other => panic!("expected Connection, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_error_decode() {
        let err = connect_error(
            URL.to_string(),
            PlexError::Decode {
                path: "/".to_string(),
                reason: "missing MediaContainer.machineIdentifier".to_string(),
            },
        );
        match err {
            PlexError::Connection { url, reason } => {
                assert_eq!(url, URL);
                assert_eq!(reason, "not a Plex Media Server (missing MediaContainer.machineIdentifier)");
            }
            other => panic!("expected Connection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_error_transport() {
        let request_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .err()
            .unwrap();
        let err = connect_error(URL.to_string(), PlexError::Request(request_err));
        assert!(matches!(err, PlexError::Connection { ref url, .. } if url == URL));
        assert!(err.is_connection());
    }

    #[test]
    fn test_connect_error_passes_through_other_errors() {
        let err = connect_error(URL.to_string(), PlexError::Unauthorized);
        assert!(matches!(err, PlexError::Unauthorized));
        assert!(err.is_connection());

        let err = connect_error(URL.to_string(), PlexError::InvalidKeyword);
        assert!(matches!(err, PlexError::InvalidKeyword));
    }
}
