//! Chat domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque message identifier (Value Object)
///
/// Stable for the lifetime of the message. The domain never inspects its
/// structure; ids are minted by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A message in the chat transcript (Entity)
///
/// `id` and `sender` are fixed at creation. `text` only ever grows (assistant
/// replies mid-stream), and `metadata` is replaced wholesale by each update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    sender: Sender,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
    /// Set on notices standing in for a reply that could not be fetched.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    error: bool,
}

impl ChatMessage {
    /// A user message, created with its final content.
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.into(),
            metadata: None,
            error: false,
        }
    }

    /// An assistant message. Streamed replies start with their first fragment.
    pub fn assistant(id: MessageId, text: impl Into<String>, metadata: Option<Value>) -> Self {
        Self {
            id,
            sender: Sender::Assistant,
            text: text.into(),
            metadata,
            error: false,
        }
    }

    /// An assistant-side notice reporting a failed turn.
    pub fn error_notice(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::Assistant,
            text: text.into(),
            metadata: None,
            error: true,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Append a streamed fragment and replace the metadata.
    pub(crate) fn append(&mut self, fragment: &str, metadata: Option<Value>) {
        self.text.push_str(fragment);
        self.metadata = metadata;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_has_no_metadata() {
        let msg = ChatMessage::user(MessageId::new("1-user"), "How do I play Frost?");
        assert_eq!(msg.sender(), Sender::User);
        assert_eq!(msg.text(), "How do I play Frost?");
        assert!(msg.metadata().is_none());
        assert!(!msg.is_assistant());
    }

    #[test]
    fn test_append_replaces_metadata() {
        let mut msg = ChatMessage::assistant(
            MessageId::new("1-assistant"),
            "Hel",
            Some(json!({"langgraph_node": "assistant", "step": 1})),
        );
        msg.append("lo", Some(json!({"step": 2})));
        assert_eq!(msg.text(), "Hello");
        assert_eq!(msg.metadata(), Some(&json!({"step": 2})));

        msg.append("!", None);
        assert_eq!(msg.text(), "Hello!");
        assert!(msg.metadata().is_none());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(Sender::User.to_string(), "user");
    }

    #[test]
    fn test_message_id_is_transparent() {
        let msg = ChatMessage::user(MessageId::new("abc"), "hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["sender"], "user");
        assert!(value.get("metadata").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_notice_is_flagged() {
        let notice = ChatMessage::error_notice(MessageId::new("2"), "Error: Timeout");
        assert!(notice.is_error());
        assert!(notice.is_assistant());
        assert_eq!(serde_json::to_value(&notice).unwrap()["error"], true);

        // a reply that merely reads like a failure is still a reply
        let reply = ChatMessage::assistant(MessageId::new("3"), "Error: Could not reach", None);
        assert!(!reply.is_error());
    }
}
