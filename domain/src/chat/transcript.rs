//! Ordered chat transcript

use super::entities::{ChatMessage, MessageId};
use crate::core::error::DomainError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// What applying a streamed fragment did to the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// First fragment of a reply: a new assistant message was appended.
    Inserted,
    /// Fragment appended to an existing message in place.
    Appended,
}

/// The ordered list of messages in a chat session (Aggregate)
///
/// Insertion order is preserved and never changes, which is what keeps the
/// id -> position index valid.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    index: HashMap<MessageId, usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished message. Fails if the id is already present.
    pub fn push(&mut self, message: ChatMessage) -> Result<(), DomainError> {
        if self.index.contains_key(message.id()) {
            return Err(DomainError::DuplicateMessageId(message.id().to_string()));
        }
        self.index.insert(message.id().clone(), self.messages.len());
        self.messages.push(message);
        Ok(())
    }

    /// Merge one streamed fragment into the reply identified by `id`.
    ///
    /// An existing message gets `content` appended and its metadata replaced;
    /// otherwise a new assistant message is appended at the end.
    pub fn apply_fragment(
        &mut self,
        id: &MessageId,
        content: &str,
        metadata: Option<Value>,
    ) -> FragmentOutcome {
        if let Some(&pos) = self.index.get(id) {
            self.messages[pos].append(content, metadata);
            return FragmentOutcome::Appended;
        }
        self.index.insert(id.clone(), self.messages.len());
        self.messages
            .push(ChatMessage::assistant(id.clone(), content, metadata));
        FragmentOutcome::Inserted
    }

    pub fn get(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.index.get(id).map(|&pos| &self.messages[pos])
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.index.contains_key(id)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::entities::Sender;
    use serde_json::json;

    fn id(s: &str) -> MessageId {
        MessageId::new(s)
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user(id("1"), "hi")).unwrap();
        let err = transcript
            .push(ChatMessage::user(id("1"), "again"))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateMessageId("1".to_string()));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_first_fragment_inserts_assistant_at_end() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user(id("u"), "question")).unwrap();

        let outcome = transcript.apply_fragment(&id("a"), "Hel", None);

        assert_eq!(outcome, FragmentOutcome::Inserted);
        assert_eq!(transcript.len(), 2);
        let last = transcript.last().unwrap();
        assert_eq!(last.id(), &id("a"));
        assert_eq!(last.sender(), Sender::Assistant);
        assert_eq!(last.text(), "Hel");
    }

    #[test]
    fn test_fragments_merge_in_place() {
        let mut transcript = Transcript::new();
        transcript.apply_fragment(&id("a"), "Hel", None);
        transcript.push(ChatMessage::user(id("u"), "later")).unwrap();
        assert_eq!(
            transcript.apply_fragment(&id("a"), "lo ", Some(json!({"n": 1}))),
            FragmentOutcome::Appended
        );
        transcript.apply_fragment(&id("a"), "world", Some(json!({"n": 2})));

        assert_eq!(transcript.len(), 2);
        let reply = transcript.get(&id("a")).unwrap();
        assert_eq!(reply.text(), "Hello world");
        assert_eq!(reply.metadata(), Some(&json!({"n": 2})));
        // order untouched
        assert_eq!(transcript.messages()[0].id(), &id("a"));
        assert_eq!(transcript.messages()[1].id(), &id("u"));
    }

    #[test]
    fn test_serializes_as_array() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user(id("u"), "hi")).unwrap();
        let value = serde_json::to_value(&transcript).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["text"], "hi");
    }
}
