use serde::{Deserialize, Serialize};

/// Identity document returned by the server root endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerIdentity {
    pub machine_identifier: String,
    pub friendly_name: String,
    pub version: String,
}
