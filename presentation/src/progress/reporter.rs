//! Console rendering of chat turns as they stream

use crate::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;
use teachmewow_application::{ReplyObserver, TurnOutcome};
use teachmewow_domain::{ChatMessage, FragmentOutcome, MessageId};

/// Prints each reply as it grows
///
/// Only the text added since the last update is written, so the terminal
/// shows one continuous answer. A spinner fills the gap between sending and
/// the first fragment.
pub struct ConsoleObserver {
    out: Mutex<Box<dyn Write + Send>>,
    printed: Mutex<HashMap<MessageId, usize>>,
    spinner: Mutex<Option<ProgressBar>>,
    show_progress: bool,
}

impl ConsoleObserver {
    /// Observer writing to stdout.
    pub fn new(show_progress: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), show_progress)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, show_progress: bool) -> Self {
        Self {
            out: Mutex::new(out),
            printed: Mutex::new(HashMap::new()),
            spinner: Mutex::new(None),
            show_progress,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = write!(out, "{}", text);
            let _ = out.flush();
        }
    }

    /// Text of `message` not yet written, recording it as written.
    fn take_delta(&self, message: &ChatMessage) -> String {
        let Ok(mut printed) = self.printed.lock() else {
            return String::new();
        };
        let already = printed.entry(message.id().clone()).or_insert(0);
        let delta = message.text().get(*already..).unwrap_or_default().to_string();
        *already = message.text().len();
        delta
    }
}

impl ReplyObserver for ConsoleObserver {
    fn on_reply_start(&self, _reply_id: &MessageId) {
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Consulting the guide...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_reply_update(&self, message: &ChatMessage, outcome: FragmentOutcome) {
        self.clear_spinner();
        let delta = self.take_delta(message);
        if outcome == FragmentOutcome::Inserted {
            self.write(&format!("{} ", ConsoleFormatter::label(message.sender())));
        }
        self.write(&delta);
    }

    fn on_error_message(&self, message: &ChatMessage) {
        self.clear_spinner();
        let streamed_any = self
            .printed
            .lock()
            .map(|printed| !printed.is_empty())
            .unwrap_or(false);
        if streamed_any {
            self.write("\n");
        }
        self.write(&ConsoleFormatter::format_message(message));
    }

    fn on_reply_end(&self, outcome: &TurnOutcome) {
        self.clear_spinner();
        if let Some(note) = ConsoleFormatter::format_outcome_note(outcome) {
            self.write(&format!(" {}", note));
        }
        self.write("\n");
        if let Ok(mut printed) = self.printed.lock() {
            printed.clear();
        }
    }
}
