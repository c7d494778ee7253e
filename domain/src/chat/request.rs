//! Outbound chat request body

use super::llm_config::LlmConfig;
use serde::{Deserialize, Serialize};

/// The user's message as the assistant service expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub content: String,
}

/// Body of `POST /agent/chat/stream`
///
/// Serializes to `{"message": {"content": ...}, "llm_config": {"model": ..., "provider": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: MessageContent,
    pub llm_config: LlmConfig,
}

impl ChatRequest {
    pub fn new(content: impl Into<String>, llm_config: LlmConfig) -> Self {
        Self {
            message: MessageContent {
                content: content.into(),
            },
            llm_config,
        }
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}
