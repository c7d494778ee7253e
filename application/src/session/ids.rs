//! Message id minting

use std::sync::atomic::{AtomicU64, Ordering};
use teachmewow_domain::{MessageId, Sender};

/// Mints ids of the form `<unix-millis>-<seq>-<sender>`.
///
/// The sequence makes ids minted within the same millisecond distinct.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    sequence: AtomicU64,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, sender: Sender) -> MessageId {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        MessageId::new(format!("{millis}-{seq}-{sender}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids = MessageIdGenerator::new();
        let minted: HashSet<_> = (0..1000).map(|_| ids.next(Sender::Assistant)).collect();
        assert_eq!(minted.len(), 1000);
    }

    #[test]
    fn test_id_carries_sender_suffix() {
        let ids = MessageIdGenerator::new();
        assert!(ids.next(Sender::User).as_str().ends_with("-0-user"));
        assert!(ids.next(Sender::Assistant).as_str().ends_with("-1-assistant"));
    }
}
