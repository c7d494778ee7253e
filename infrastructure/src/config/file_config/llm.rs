//! Model selection from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use teachmewow_domain::{DomainError, LlmConfig};

/// Raw LLM configuration from TOML
///
/// Sent verbatim with every chat request; the service decides what the
/// names mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub model: String,
    pub provider: String,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        let defaults = LlmConfig::default();
        Self {
            model: defaults.model,
            provider: defaults.provider,
        }
    }
}

impl FileLlmConfig {
    pub fn to_llm_config(&self) -> Result<LlmConfig, DomainError> {
        LlmConfig::new(self.model.trim(), self.provider.trim())
    }
}
