//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ConsoleObserver};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use teachmewow_application::{ChatSession, SendMessageUseCase};
use teachmewow_domain::LlmConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    /// Reprint the conversation so far
    History,
    /// Dump the conversation as JSON
    Json,
    /// Show endpoint and model settings
    Config,
    /// Switch the model for later turns
    Model(String),
    /// Switch the provider for later turns
    Provider(String),
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match (name, arg) {
            ("quit" | "exit" | "q", _) => ReplCommand::Quit,
            ("help" | "h" | "?", _) => ReplCommand::Help,
            ("history", _) => ReplCommand::History,
            ("json", _) => ReplCommand::Json,
            ("config" | "model" | "provider", "") => ReplCommand::Config,
            ("model", name) => ReplCommand::Model(name.to_string()),
            ("provider", name) => ReplCommand::Provider(name.to_string()),
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: SendMessageUseCase,
    session: ChatSession,
    config: ReplConfig,
    endpoint: String,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: SendMessageUseCase, session: ChatSession) -> Self {
        Self {
            use_case,
            session,
            config: ReplConfig::default(),
            endpoint: String::new(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Endpoint shown by `/config`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("teachmewow".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    self.send(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => continue,
            }
        }

        Ok(())
    }

    fn line_editor(&self) -> Reedline {
        let line_editor = Reedline::create();
        let Some(path) = self.config.history_path() else {
            return line_editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => {
                debug!("Using history file {}", path.display());
                line_editor.with_history(Box::new(history))
            }
            Err(e) => {
                warn!("History disabled, could not open {}: {}", path.display(), e);
                line_editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::header("TeachMeWow - Guide Chat"));
        println!();
        println!("{}", ConsoleFormatter::format_session(&self.session, &self.endpoint));
        println!();
        println!("Type /help for commands. Ctrl+C stops a reply, Ctrl+D exits.");
        println!();
        if !self.session.transcript().is_empty() {
            println!("{}", ConsoleFormatter::format_transcript(self.session.transcript()));
            println!();
        }
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /history           - Show the conversation so far");
        println!("  /json              - Print the conversation as JSON");
        println!("  /config            - Show endpoint and model");
        println!("  /model <name>      - Use another model for later messages");
        println!("  /provider <name>   - Use another provider for later messages");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::format_transcript(self.session.transcript()));
                println!();
            }
            ReplCommand::Json => {
                println!("{}", ConsoleFormatter::format_json(self.session.transcript()));
            }
            ReplCommand::Config => {
                println!();
                println!("{}", ConsoleFormatter::format_session(&self.session, &self.endpoint));
                println!();
            }
            ReplCommand::Model(model) => {
                let provider = self.session.llm_config().provider.clone();
                self.switch_llm(&model, &provider);
            }
            ReplCommand::Provider(provider) => {
                let model = self.session.llm_config().model.clone();
                self.switch_llm(&model, &provider);
            }
            ReplCommand::Unknown(line) => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn switch_llm(&mut self, model: &str, provider: &str) {
        match LlmConfig::new(model, provider) {
            Ok(llm) => {
                println!("Now using {} ({})", llm.model.bold(), llm.provider);
                self.session.set_llm_config(llm);
            }
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    /// Send one message and stream the reply. Ctrl+C cancels the reply.
    async fn send(&mut self, line: &str) {
        println!();
        let observer = ConsoleObserver::new(self.config.show_progress);
        let token = CancellationToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            }
        });

        let result = self
            .use_case
            .execute_with_cancellation(&mut self.session, line, &observer, &token)
            .await;
        watcher.abort();

        if let Err(e) = result {
            eprintln!("{} {}", "Error:".red(), e);
        }
        println!();
    }
}
