//! Send Message use case.
//!
//! Runs one chat turn: records the user's message, sends it to the assistant
//! service and merges the streamed reply into the session transcript as it
//! arrives.
//!
//! Failures never roll the transcript back:
//!
//! - the request fails outright → one synthetic assistant error message under
//!   the reply id, no partial content
//! - the stream breaks midway → the partial reply stays; the error is added
//!   after it
//! - a record fails to decode → logged and skipped

use crate::ports::chat_gateway::{ByteStream, ChatGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::reply_observer::ReplyObserver;
use crate::session::{ChatSession, MessageIdGenerator};
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use teachmewow_domain::{
    ChatMessage, ChatRequest, DomainError, MessageId, RecordError, ReplyMerger, ReplySummary,
    Sender, truncate,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Prefix of the synthetic message shown when a turn fails.
pub const ERROR_MESSAGE_PREFIX: &str = "Error: Could not reach the assistant.";

/// Reasons a turn is refused before anything is sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A reply is still streaming")]
    Busy,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply streamed to the end.
    Completed(ReplySummary),
    /// The stream broke after opening. Merged text was kept.
    Interrupted { summary: ReplySummary, error: String },
    /// The request itself failed; nothing was streamed.
    Failed { reply_id: MessageId, error: String },
    /// Cancelled by the caller. `summary` is `None` if the stream never opened.
    Cancelled {
        reply_id: MessageId,
        summary: Option<ReplySummary>,
    },
}

impl TurnOutcome {
    pub fn reply_id(&self) -> &MessageId {
        match self {
            TurnOutcome::Completed(summary) | TurnOutcome::Interrupted { summary, .. } => {
                &summary.target
            }
            TurnOutcome::Failed { reply_id, .. } | TurnOutcome::Cancelled { reply_id, .. } => {
                reply_id
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TurnOutcome::Interrupted { error, .. } | TurnOutcome::Failed { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Completed(_))
    }
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for sending one chat message and streaming the reply.
///
/// Only one turn may be in flight at a time; a second call while a reply is
/// streaming is refused with [`SendMessageError::Busy`].
pub struct SendMessageUseCase {
    gateway: Arc<dyn ChatGateway>,
    ids: Arc<MessageIdGenerator>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
    busy: Arc<AtomicBool>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            ids: Arc::new(MessageIdGenerator::new()),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token. Once cancelled, no further transcript
    /// updates happen for the turn in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Whether a turn is currently streaming.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Execute one chat turn, cancellable through the token set with
    /// [`with_cancellation`](Self::with_cancellation) (if any).
    pub async fn execute(
        &self,
        session: &mut ChatSession,
        text: &str,
        observer: &dyn ReplyObserver,
    ) -> Result<TurnOutcome, SendMessageError> {
        let token = self.cancellation_token.clone();
        self.run_turn(session, text, observer, token.as_ref()).await
    }

    /// Execute one chat turn that stops when `token` is cancelled.
    ///
    /// Interactive callers create a fresh token per turn, since a cancelled
    /// token stays cancelled.
    pub async fn execute_with_cancellation(
        &self,
        session: &mut ChatSession,
        text: &str,
        observer: &dyn ReplyObserver,
        token: &CancellationToken,
    ) -> Result<TurnOutcome, SendMessageError> {
        self.run_turn(session, text, observer, Some(token)).await
    }

    async fn run_turn(
        &self,
        session: &mut ChatSession,
        text: &str,
        observer: &dyn ReplyObserver,
        token: Option<&CancellationToken>,
    ) -> Result<TurnOutcome, SendMessageError> {
        if text.trim().is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }
        let _busy = BusyGuard::acquire(&self.busy).ok_or(SendMessageError::Busy)?;

        let user_message = ChatMessage::user(self.ids.next(Sender::User), text);
        session.transcript_mut().push(user_message.clone())?;
        observer.on_user_message(&user_message);
        self.conversation_logger
            .log(ConversationEvent::user_message(user_message.id(), text));

        let reply_id = self.ids.next(Sender::Assistant);
        let request = ChatRequest::new(text, session.llm_config().clone());
        info!(
            "Sending chat turn {} ({} / {}): {}",
            reply_id,
            request.llm_config.model,
            request.llm_config.provider,
            truncate(text, 100)
        );
        observer.on_reply_start(&reply_id);

        let outcome = match cancellable(token, self.gateway.open_stream(&request)).await {
            None => TurnOutcome::Cancelled {
                reply_id,
                summary: None,
            },
            Some(Err(e)) => {
                error!("Chat request failed: {}", e);
                self.push_error(session, reply_id.clone(), &e, observer)?;
                TurnOutcome::Failed {
                    reply_id,
                    error: e.to_string(),
                }
            }
            Some(Ok(stream)) => {
                self.consume(stream, reply_id, session, observer, token)
                    .await?
            }
        };

        self.log_outcome(session, &outcome);
        observer.on_reply_end(&outcome);
        Ok(outcome)
    }

    /// Drain the reply body into the transcript until it ends, breaks or the
    /// turn is cancelled.
    async fn consume(
        &self,
        mut stream: ByteStream,
        reply_id: MessageId,
        session: &mut ChatSession,
        observer: &dyn ReplyObserver,
        token: Option<&CancellationToken>,
    ) -> Result<TurnOutcome, SendMessageError> {
        let mut merger = ReplyMerger::new(reply_id.clone());

        loop {
            let Some(next) = cancellable(token, stream.next()).await else {
                let summary = merger.cancel();
                info!(
                    "Chat turn {} cancelled after {} fragment(s)",
                    reply_id, summary.applied
                );
                return Ok(TurnOutcome::Cancelled {
                    reply_id,
                    summary: Some(summary),
                });
            };

            match next {
                Some(Ok(chunk)) => {
                    let report = merger.feed(&chunk, session.transcript_mut(), |message, outcome| {
                        observer.on_reply_update(message, outcome)
                    });
                    for record_error in &report.malformed {
                        log_malformed(record_error);
                    }
                    debug!(
                        "Chunk of {} bytes: {} applied, {} heartbeat(s), {} ignored",
                        chunk.len(),
                        report.applied,
                        report.heartbeats,
                        report.ignored
                    );
                }
                Some(Err(e)) => {
                    let summary = merger.fail();
                    error!(
                        "Reply stream {} broke after {} fragment(s): {}",
                        reply_id, summary.applied, e
                    );
                    // the reply id is taken once a fragment has landed
                    let error_id = if summary.applied == 0 {
                        reply_id
                    } else {
                        self.ids.next(Sender::Assistant)
                    };
                    self.push_error(session, error_id, &e, observer)?;
                    return Ok(TurnOutcome::Interrupted {
                        summary,
                        error: e.to_string(),
                    });
                }
                None => {
                    let summary = merger.finish();
                    if summary.discarded_bytes > 0 {
                        warn!(
                            "Discarding {} trailing byte(s) of an incomplete record",
                            summary.discarded_bytes
                        );
                    }
                    info!(
                        "Chat turn {} completed: {} fragment(s), {} malformed record(s)",
                        reply_id, summary.applied, summary.malformed
                    );
                    return Ok(TurnOutcome::Completed(summary));
                }
            }
        }
    }

    fn push_error(
        &self,
        session: &mut ChatSession,
        id: MessageId,
        error: &GatewayError,
        observer: &dyn ReplyObserver,
    ) -> Result<(), SendMessageError> {
        let message = ChatMessage::error_notice(id, format!("{ERROR_MESSAGE_PREFIX} {error}"));
        session.transcript_mut().push(message.clone())?;
        observer.on_error_message(&message);
        Ok(())
    }

    fn log_outcome(&self, session: &ChatSession, outcome: &TurnOutcome) {
        let reply_text = session
            .transcript()
            .get(outcome.reply_id())
            .filter(|m| m.is_assistant() && !m.is_error())
            .map(|m| m.text().to_string());

        let event = match outcome {
            TurnOutcome::Completed(summary)
            | TurnOutcome::Cancelled {
                summary: Some(summary),
                ..
            } => ConversationEvent::assistant_reply(summary, reply_text),
            TurnOutcome::Cancelled {
                reply_id,
                summary: None,
            } => ConversationEvent::TurnCancelled {
                id: reply_id.clone(),
            },
            TurnOutcome::Interrupted { summary, error } => ConversationEvent::TurnFailed {
                id: summary.target.clone(),
                partial_text: reply_text,
                fragments: summary.applied,
                error: error.clone(),
            },
            TurnOutcome::Failed { reply_id, error } => ConversationEvent::TurnFailed {
                id: reply_id.clone(),
                partial_text: None,
                fragments: 0,
                error: error.clone(),
            },
        };
        self.conversation_logger.log(event);
    }
}

/// Await `future` unless `token` is cancelled first.
async fn cancellable<F: Future>(
    token: Option<&CancellationToken>,
    future: F,
) -> Option<F::Output> {
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

fn log_malformed(record_error: &RecordError) {
    let RecordError::InvalidJson { raw, source } = record_error;
    warn!(
        "Dropping stream record with invalid JSON ({}): {}",
        source,
        truncate(raw, 200)
    );
}
