//! Service endpoint configuration from TOML (`[endpoint]` section)

use crate::http::{ChatEndpoint, HttpError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Scheme, host and port of the assistant service
    pub base_url: String,
    /// Prefix of the versioned API routes
    pub api_prefix: String,
    /// Timeout for establishing the connection (the stream itself never times out)
    pub connect_timeout_seconds: Option<u64>,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            connect_timeout_seconds: None,
        }
    }
}

impl FileEndpointConfig {
    pub fn to_endpoint(&self) -> Result<ChatEndpoint, HttpError> {
        ChatEndpoint::new(&self.base_url, &self.api_prefix)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_seconds.map(Duration::from_secs)
    }
}
