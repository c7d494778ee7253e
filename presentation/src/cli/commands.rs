//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for teachmewow
#[derive(Parser, Debug)]
#[command(name = "teachmewow")]
#[command(author, version, about = "Chat with the TeachMeWow specialization guide")]
#[command(long_about = r#"
TeachMeWow streams answers from the guide assistant straight into your
terminal, fragment by fragment, as the service produces them.

Configuration files are loaded from (in priority order):
1. TEACHMEWOW_* environment variables (e.g. TEACHMEWOW_LLM__MODEL)
2. --config <path>        Explicit config file
3. ./teachmewow.toml      Project-level config
4. ~/.config/teachmewow/config.toml   Global config

Example:
  teachmewow "What stat priority should a Fire mage follow?"
  teachmewow --model gpt-4o-mini --provider openai "Best M+ talents for Holy Paladin?"
  teachmewow --chat --url http://localhost:8000
  teachmewow --health
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Base URL of the assistant service (e.g. http://localhost:8000)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Model name sent with each request
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Provider name sent with each request
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Check the service health endpoint and exit
    #[arg(long)]
    pub health: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append conversation events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Log filter for the `-v` count, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_message() {
        let cli = Cli::try_parse_from(["teachmewow", "Best trinkets for Arms?"]).unwrap();
        assert_eq!(cli.message.as_deref(), Some("Best trinkets for Arms?"));
        assert!(!cli.chat);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_overrides_and_flags() {
        let cli = Cli::try_parse_from([
            "teachmewow",
            "--chat",
            "--url",
            "http://127.0.0.1:9000",
            "-m",
            "gpt-4o-mini",
            "--provider",
            "openai",
            "-vv",
            "-q",
            "--no-color",
            "--conversation-log",
            "chat.jsonl",
        ])
        .unwrap();
        assert!(cli.chat);
        assert!(cli.message.is_none());
        assert_eq!(cli.url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.provider.as_deref(), Some("openai"));
        assert_eq!(cli.log_level(), "debug");
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert_eq!(cli.conversation_log, Some(PathBuf::from("chat.jsonl")));
    }

    #[test]
    fn test_verbosity_saturates_at_trace() {
        let cli = Cli::try_parse_from(["teachmewow", "-vvvv", "--health"]).unwrap();
        assert!(cli.health);
        assert_eq!(cli.log_level(), "trace");
    }
}
