//! Application layer for teachmewow
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatParams;
pub use ports::{
    chat_gateway::{ByteStream, ChatGateway, GatewayError, HealthStatus},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    reply_observer::{NoReplyObserver, ReplyObserver},
};
pub use session::{ChatSession, MessageIdGenerator, INITIAL_MESSAGE_ID};
pub use use_cases::send_message::{
    ERROR_MESSAGE_PREFIX, SendMessageError, SendMessageUseCase, TurnOutcome,
};
