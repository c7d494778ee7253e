//! LLM selection sent along with every chat turn

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Model and provider the assistant service should answer with (Value Object)
///
/// The service interprets both strings; the client only guarantees they are
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub provider: String,
}

impl LlmConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";
    pub const DEFAULT_PROVIDER: &'static str = "azure";

    pub fn new(model: impl Into<String>, provider: impl Into<String>) -> Result<Self, DomainError> {
        let config = Self {
            model: model.into(),
            provider: provider.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.trim().is_empty() {
            return Err(DomainError::InvalidLlmConfig(
                "model cannot be empty".to_string(),
            ));
        }
        if self.provider.trim().is_empty() {
            return Err(DomainError::InvalidLlmConfig(
                "provider cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            provider: Self::DEFAULT_PROVIDER.to_string(),
        }
    }
}
