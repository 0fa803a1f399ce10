use serde::{Deserialize, Serialize};
use std::fmt;

/// A playback endpoint currently connected to the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientDevice {
    pub title: String,
    pub machine_identifier: String,
    pub product: String,
    pub platform: Option<String>,
    pub host: Option<String>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub protocol_version: Option<String>,
}

impl fmt::Display for ClientDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.product.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} ({})", self.title, self.product)
        }
    }
}
