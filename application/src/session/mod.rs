//! Chat session state.
//!
//! - [`ChatSession`]: the transcript plus the LLM selection of one conversation
//! - [`MessageIdGenerator`]: mints unique message ids

mod ids;

pub use ids::MessageIdGenerator;

use crate::config::ChatParams;
use teachmewow_domain::{ChatMessage, LlmConfig, MessageId, Transcript};

/// Id of the greeting message a session starts with.
pub const INITIAL_MESSAGE_ID: &str = "initial-assistant-msg";

/// One conversation with the assistant.
///
/// Lives in memory only. The transcript is mutated exclusively by
/// [`SendMessageUseCase`](crate::use_cases::send_message::SendMessageUseCase).
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    llm_config: LlmConfig,
}

impl ChatSession {
    pub fn new(params: &ChatParams) -> Self {
        let mut transcript = Transcript::new();
        if let Some(greeting) = params.greeting.as_deref().filter(|g| !g.trim().is_empty()) {
            // empty transcript, cannot collide
            let _ = transcript.push(ChatMessage::assistant(
                MessageId::new(INITIAL_MESSAGE_ID),
                greeting,
                None,
            ));
        }

        Self {
            transcript,
            llm_config: params.llm.clone(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn llm_config(&self) -> &LlmConfig {
        &self.llm_config
    }

    pub fn set_llm_config(&mut self, llm_config: LlmConfig) {
        self.llm_config = llm_config;
    }
}
