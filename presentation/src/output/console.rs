//! Console output formatter for chat transcripts

use colored::{ColoredString, Colorize};
use teachmewow_application::{ChatSession, TurnOutcome};
use teachmewow_domain::{ChatMessage, Sender, Transcript};

/// Formats chat messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Speaker label shown before a message
    pub fn label(sender: Sender) -> String {
        match sender {
            Sender::User => "You:".green().bold().to_string(),
            Sender::Assistant => "Assistant:".cyan().bold().to_string(),
        }
    }

    /// Message text, in red for failure notices
    pub fn body(message: &ChatMessage) -> ColoredString {
        if message.is_error() {
            message.text().red()
        } else {
            message.text().normal()
        }
    }

    /// Format one message with its label
    pub fn format_message(message: &ChatMessage) -> String {
        format!("{} {}", Self::label(message.sender()), Self::body(message))
    }

    /// Format a whole transcript, one message per paragraph
    pub fn format_transcript(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }
        transcript
            .messages()
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format as JSON
    pub fn format_json(transcript: &Transcript) -> String {
        serde_json::to_string_pretty(transcript).unwrap_or_else(|_| "[]".to_string())
    }

    /// Short status line for the session settings
    pub fn format_session(session: &ChatSession, endpoint: &str) -> String {
        format!(
            "{} {}\n{} {} ({})",
            "Endpoint:".cyan().bold(),
            endpoint,
            "Model:".cyan().bold(),
            session.llm_config().model,
            session.llm_config().provider
        )
    }

    /// One-line note appended after a turn that did not complete
    pub fn format_outcome_note(outcome: &TurnOutcome) -> Option<String> {
        match outcome {
            TurnOutcome::Cancelled { .. } => Some("[cancelled]".yellow().to_string()),
            TurnOutcome::Completed(summary) if summary.applied == 0 => {
                Some("[the assistant sent no text]".dimmed().to_string())
            }
            _ => None,
        }
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;
    use teachmewow_domain::MessageId;

    fn transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript
            .push(ChatMessage::user(MessageId::new("1"), "Which covenant?"))
            .unwrap();
        transcript
            .push(ChatMessage::assistant(MessageId::new("2"), "Night Fae.", None))
            .unwrap();
        transcript
    }

    #[test]
    fn test_format_transcript_labels_each_message() {
        let output = ConsoleFormatter::format_transcript(&transcript());
        assert!(output.contains("You:"));
        assert!(output.contains("Which covenant?"));
        assert!(output.contains("Assistant:"));
        assert!(output.contains("Night Fae."));
    }

    #[test]
    fn test_empty_transcript() {
        let output = ConsoleFormatter::format_transcript(&Transcript::new());
        assert!(output.contains("no messages yet"));
    }

    #[test]
    fn test_only_flagged_notices_render_red() {
        let notice = ChatMessage::error_notice(MessageId::new("3"), "Error: Timeout");
        let lookalike =
            ChatMessage::assistant(MessageId::new("4"), "Error: Could not reach the raid", None);

        assert_eq!(ConsoleFormatter::body(&notice).fgcolor(), Some(Color::Red));
        assert_eq!(ConsoleFormatter::body(&lookalike).fgcolor(), None);
    }

    #[test]
    fn test_format_json_round_trips_messages() {
        let json = ConsoleFormatter::format_json(&transcript());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["sender"], "user");
        assert_eq!(value[1]["text"], "Night Fae.");
    }
}
