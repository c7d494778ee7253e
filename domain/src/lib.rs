//! Domain layer for teachmewow
//!
//! This crate contains the chat entities and the streamed-reply decoder.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The ordered list of [`ChatMessage`]s of one chat session. Messages are
//! never reordered or removed; an assistant reply is updated in place while
//! it streams in.
//!
//! ## Reply stream
//!
//! The assistant service answers with `data: <json>\n\n` records.
//! [`SseDecoder`] frames the raw bytes, [`ReplyMerger`] applies each decoded
//! fragment to the [`Transcript`] under a reply id chosen before the request
//! is sent.

pub mod chat;
pub mod core;
pub mod stream;

// Re-export commonly used types
pub use chat::{
    entities::{ChatMessage, MessageId, Sender},
    llm_config::LlmConfig,
    request::{ChatRequest, MessageContent},
    transcript::{FragmentOutcome, Transcript},
};
pub use core::{error::DomainError, string::truncate};
pub use stream::{
    decoder::{RecordError, SseDecoder, SseRecord},
    merger::{FeedReport, ReplyMerger, ReplySummary, StreamEnd},
    payload::StreamPayload,
};
