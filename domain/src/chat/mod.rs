//! Chat domain.
//!
//! - [`entities::ChatMessage`]: a single message in the conversation
//! - [`transcript::Transcript`]: the ordered message list a reply streams into
//! - [`llm_config::LlmConfig`]: which model/provider the assistant should use
//! - [`request::ChatRequest`]: the body of one outbound chat turn

pub mod entities;
pub mod llm_config;
pub mod request;
pub mod transcript;
