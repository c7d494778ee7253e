//! Port for the machine-readable conversation log.
//!
//! Diagnostics go through `tracing`. This port records what was said in each
//! turn and how the turn ended, one [`ConversationEvent`] at a time.

use serde::Serialize;
use teachmewow_domain::{MessageId, ReplySummary, StreamEnd};

/// One entry of the conversation log.
///
/// Serializes as a flat object tagged by `type`
/// (`{"type":"user_message","id":...,"text":...}`). The adapter adds the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    UserMessage {
        id: MessageId,
        text: String,
    },
    /// A reply stream that produced text, whether it ran to the end or not.
    AssistantReply {
        id: MessageId,
        text: Option<String>,
        end: StreamEnd,
        fragments: usize,
        heartbeats: usize,
        malformed: usize,
    },
    TurnFailed {
        id: MessageId,
        #[serde(skip_serializing_if = "Option::is_none")]
        partial_text: Option<String>,
        fragments: usize,
        error: String,
    },
    /// Cancelled before the reply stream opened.
    TurnCancelled {
        id: MessageId,
    },
}

impl ConversationEvent {
    pub fn user_message(id: &MessageId, text: &str) -> Self {
        Self::UserMessage {
            id: id.clone(),
            text: text.to_string(),
        }
    }

    pub fn assistant_reply(summary: &ReplySummary, text: Option<String>) -> Self {
        Self::AssistantReply {
            id: summary.target.clone(),
            text,
            end: summary.end,
            fragments: summary.applied,
            heartbeats: summary.heartbeats,
            malformed: summary.malformed,
        }
    }

    /// Id of the message the event is about.
    pub fn id(&self) -> &MessageId {
        match self {
            Self::UserMessage { id, .. }
            | Self::AssistantReply { id, .. }
            | Self::TurnFailed { id, .. }
            | Self::TurnCancelled { id } => id,
        }
    }
}

/// Sink for [`ConversationEvent`]s.
///
/// Synchronous and infallible: a broken log never fails a chat turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_serialize_flat_with_type_tag() {
        let event = ConversationEvent::user_message(&MessageId::new("1-1-user"), "Fury or Arms?");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "user_message", "id": "1-1-user", "text": "Fury or Arms?"})
        );

        let summary = ReplySummary {
            target: MessageId::new("1-2-assistant"),
            end: StreamEnd::Cancelled,
            applied: 4,
            heartbeats: 1,
            ignored: 0,
            malformed: 0,
            discarded_bytes: 0,
        };
        let value =
            serde_json::to_value(ConversationEvent::assistant_reply(&summary, Some("Fury".into())))
                .unwrap();
        assert_eq!(value["type"], "assistant_reply");
        assert_eq!(value["end"], "cancelled");
        assert_eq!(value["fragments"], 4);
    }

    #[test]
    fn test_failed_turn_without_partial_text_omits_it() {
        let event = ConversationEvent::TurnFailed {
            id: MessageId::new("r"),
            partial_text: None,
            fragments: 0,
            error: "Timeout".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "turn_failed");
        assert!(value.get("partial_text").is_none());
        assert_eq!(event.id().as_str(), "r");
    }
}
