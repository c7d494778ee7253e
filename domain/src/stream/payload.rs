//! JSON payload of a single stream record

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "content": string | null, "meta"?: any }`
///
/// `meta` is forwarded to the transcript untouched. A missing or null
/// `content` marks a control frame that carries no text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPayload {
    pub content: Option<String>,
    pub meta: Option<Value>,
}

impl StreamPayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_heartbeat(&self) -> bool {
        self.content.is_none()
    }
}
