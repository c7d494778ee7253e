//! Merging a streamed reply into the transcript.

use super::decoder::{RecordError, SseDecoder, SseRecord};
use crate::chat::entities::{ChatMessage, MessageId};
use crate::chat::transcript::{FragmentOutcome, Transcript};
use serde::Serialize;

/// How a reply stream ended. Each merger reaches exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamEnd {
    /// The body reported end-of-data.
    Completed,
    /// The transport broke mid-stream. Merged text stays in place.
    Failed,
    /// The consumer went away before the stream ended.
    Cancelled,
}

/// Result of feeding one chunk
#[derive(Debug, Default)]
pub struct FeedReport {
    pub applied: usize,
    pub heartbeats: usize,
    pub ignored: usize,
    /// Records dropped because they failed to decode, for the caller to log.
    pub malformed: Vec<RecordError>,
}

/// Totals for a whole reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySummary {
    pub target: MessageId,
    pub end: StreamEnd,
    pub applied: usize,
    pub heartbeats: usize,
    pub ignored: usize,
    pub malformed: usize,
    /// Trailing bytes with no delimiter, dropped at end of stream.
    pub discarded_bytes: usize,
}

/// Decodes one reply stream and merges its fragments into a [`Transcript`].
///
/// Created once per streamed reply with the id the reply will live under.
/// [`finish`](Self::finish), [`fail`](Self::fail) and
/// [`cancel`](Self::cancel) consume the merger, so nothing can be merged
/// after the stream has ended.
#[derive(Debug)]
pub struct ReplyMerger {
    target: MessageId,
    decoder: SseDecoder,
    applied: usize,
    heartbeats: usize,
    ignored: usize,
    malformed: usize,
}

impl ReplyMerger {
    pub fn new(target: MessageId) -> Self {
        Self {
            target,
            decoder: SseDecoder::new(),
            applied: 0,
            heartbeats: 0,
            ignored: 0,
            malformed: 0,
        }
    }

    pub fn target(&self) -> &MessageId {
        &self.target
    }

    /// Whether at least one fragment has reached the transcript.
    pub fn has_applied(&self) -> bool {
        self.applied > 0
    }

    /// Decode `chunk` and apply every completed record to `transcript`.
    ///
    /// `on_update` runs after each applied fragment with the reply as it now
    /// stands, which is what drives live rendering.
    pub fn feed<F>(
        &mut self,
        chunk: &[u8],
        transcript: &mut Transcript,
        mut on_update: F,
    ) -> FeedReport
    where
        F: FnMut(&ChatMessage, FragmentOutcome),
    {
        let mut report = FeedReport::default();

        for record in self.decoder.feed(chunk) {
            match record {
                SseRecord::Fragment(payload) => {
                    let content = payload.content.unwrap_or_default();
                    let outcome = transcript.apply_fragment(&self.target, &content, payload.meta);
                    if let Some(message) = transcript.get(&self.target) {
                        on_update(message, outcome);
                    }
                    report.applied += 1;
                }
                SseRecord::Heartbeat => report.heartbeats += 1,
                SseRecord::Ignored => report.ignored += 1,
                SseRecord::Malformed(error) => report.malformed.push(error),
            }
        }

        self.applied += report.applied;
        self.heartbeats += report.heartbeats;
        self.ignored += report.ignored;
        self.malformed += report.malformed.len();
        report
    }

    /// The body ended normally.
    pub fn finish(self) -> ReplySummary {
        self.end(StreamEnd::Completed)
    }

    /// The transport broke mid-stream.
    pub fn fail(self) -> ReplySummary {
        self.end(StreamEnd::Failed)
    }

    /// The consumer stopped listening.
    pub fn cancel(self) -> ReplySummary {
        self.end(StreamEnd::Cancelled)
    }

    fn end(self, end: StreamEnd) -> ReplySummary {
        ReplySummary {
            target: self.target,
            end,
            applied: self.applied,
            heartbeats: self.heartbeats,
            ignored: self.ignored,
            malformed: self.malformed,
            discarded_bytes: self.decoder.finish(),
        }
    }
}
