//! Reply observer port
//!
//! Lets the view layer follow a chat turn as it happens: the user's message,
//! every streamed update of the reply, and how the turn ended.

use crate::use_cases::send_message::TurnOutcome;
use teachmewow_domain::{ChatMessage, FragmentOutcome, MessageId};

/// Callback for chat turn updates
///
/// Implementations live in the presentation layer. All callbacks run on the
/// task consuming the stream, one at a time.
pub trait ReplyObserver: Send + Sync {
    /// The user's message was added to the transcript.
    fn on_user_message(&self, _message: &ChatMessage) {}

    /// The request is about to be sent; `reply_id` is where the answer will land.
    fn on_reply_start(&self, _reply_id: &MessageId) {}

    /// A fragment was merged. `message` is the reply as it now stands.
    fn on_reply_update(&self, _message: &ChatMessage, _outcome: FragmentOutcome) {}

    /// A synthetic assistant message describing a failure was added.
    fn on_error_message(&self, _message: &ChatMessage) {}

    /// The turn is over.
    fn on_reply_end(&self, _outcome: &TurnOutcome) {}
}

/// No-op observer for when nothing renders the turn
pub struct NoReplyObserver;

impl ReplyObserver for NoReplyObserver {}
