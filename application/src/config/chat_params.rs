//! Chat session parameters.

use serde::{Deserialize, Serialize};
use teachmewow_domain::LlmConfig;

/// Greeting shown as the first assistant message of a new session.
pub const DEFAULT_GREETING: &str = "Hello! How can I help you master this specialization today?";

/// Parameters for starting a [`ChatSession`](crate::session::ChatSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParams {
    /// Model/provider sent with every turn.
    pub llm: LlmConfig,
    /// First assistant message. `None` or blank starts with an empty transcript.
    pub greeting: Option<String>,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

impl ChatParams {
    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_greeting(mut self, greeting: Option<String>) -> Self {
        self.greeting = greeting;
        self
    }

    pub fn without_greeting(self) -> Self {
        self.with_greeting(None)
    }
}
