//! Infrastructure layer for teachmewow
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP chat gateway, configuration file
//! loading and the JSONL conversation log.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use http::{ChatEndpoint, HttpChatGateway, HttpError};
pub use logging::JsonlConversationLogger;
