//! Chat session configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};
use teachmewow_application::config::DEFAULT_GREETING;

/// Raw chat configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Assistant message a new session opens with. An empty string disables it.
    pub greeting: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}
