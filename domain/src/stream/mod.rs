//! Streamed assistant replies.
//!
//! The assistant service answers a chat turn with a body of SSE-like records:
//!
//! ```text
//! data: {"content": "Hel", "meta": {...}}\n\n
//! data: {"content": "lo", "meta": {...}}\n\n
//! ```
//!
//! - [`decoder::SseDecoder`]: frames raw bytes into [`decoder::SseRecord`]s
//! - [`payload::StreamPayload`]: the JSON carried by one `data: ` record
//! - [`merger::ReplyMerger`]: applies decoded fragments to a [`Transcript`](crate::Transcript)

pub mod decoder;
pub mod merger;
pub mod payload;
