//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types on
//! demand.

mod chat;
mod endpoint;
mod llm;
mod logging;
mod output;
mod repl;

pub use chat::FileChatConfig;
pub use endpoint::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL, FileEndpointConfig};
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use teachmewow_application::ChatParams;
use teachmewow_domain::DomainError;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("endpoint.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("endpoint.base_url must start with http:// or https:// (got '{0}')")]
    MissingScheme(String),

    #[error("endpoint.api_prefix must start with '/' (got '{0}')")]
    InvalidApiPrefix(String),

    #[error("endpoint.connect_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.provider cannot be empty")]
    EmptyProvider,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where the assistant service lives
    pub endpoint: FileEndpointConfig,
    /// Model/provider sent with each turn
    pub llm: FileLlmConfig,
    /// Session settings
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let base_url = self.endpoint.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigValidationError::MissingScheme(base_url.to_string()));
        }

        let prefix = &self.endpoint.api_prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            issues.push(ConfigValidationError::InvalidApiPrefix(prefix.clone()));
        }

        if self.endpoint.connect_timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if self.llm.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.llm.provider.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyProvider);
        }

        issues
    }

    /// Session parameters described by this configuration.
    pub fn chat_params(&self) -> Result<ChatParams, DomainError> {
        Ok(ChatParams::default()
            .with_llm(self.llm.to_llm_config()?)
            .with_greeting(self.chat.greeting.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[endpoint]
base_url = "https://guide.example.com"
api_prefix = "/api/v2"
connect_timeout_seconds = 5

[llm]
model = "gpt-4o-mini"
provider = "openai"

[chat]
greeting = "Welcome, champion."

[output]
color = false

[repl]
show_progress = false
history_file = "~/.local/share/teachmewow/history.txt"

[logging]
conversation_log = "chat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.base_url, "https://guide.example.com");
        assert_eq!(config.endpoint.api_prefix, "/api/v2");
        assert_eq!(config.endpoint.connect_timeout_seconds, Some(5));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.chat.greeting.as_deref(), Some("Welcome, champion."));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("chat.jsonl")
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[llm]
model = "gpt-4.1"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4.1");
        // Defaults should apply
        assert_eq!(config.llm.provider, "azure");
        assert_eq!(config.endpoint.base_url, DEFAULT_BASE_URL);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        let params = config.chat_params().unwrap();
        assert_eq!(params.llm.model, "gpt-4o");
        assert!(params.greeting.is_some());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.endpoint.base_url = "localhost:8000".to_string();
        config.endpoint.api_prefix = "api/v1".to_string();
        config.endpoint.connect_timeout_seconds = Some(0);
        config.llm.model = " ".to_string();
        config.llm.provider = String::new();

        assert_eq!(
            config.validate(),
            vec![
                ConfigValidationError::MissingScheme("localhost:8000".to_string()),
                ConfigValidationError::InvalidApiPrefix("api/v1".to_string()),
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::EmptyModelName,
                ConfigValidationError::EmptyProvider,
            ]
        );
        assert!(config.chat_params().is_err());
    }

    #[test]
    fn test_empty_base_url() {
        let mut config = FileConfig::default();
        config.endpoint.base_url = String::new();
        assert_eq!(config.validate(), vec![ConfigValidationError::EmptyBaseUrl]);
    }
}
