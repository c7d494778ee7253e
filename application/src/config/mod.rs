//! Application-level configuration.
//!
//! - [`ChatParams`]: how a new chat session is set up (LLM selection, greeting)

pub mod chat_params;

pub use chat_params::{ChatParams, DEFAULT_GREETING};
