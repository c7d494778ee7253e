//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message id already present in transcript: {0}")]
    DuplicateMessageId(String),

    #[error("Invalid LLM config: {0}")]
    InvalidLlmConfig(String),
}
