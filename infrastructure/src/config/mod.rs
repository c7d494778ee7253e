//! Configuration file loading for teachmewow
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TEACHMEWOW_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./teachmewow.toml` or `./.teachmewow.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/teachmewow/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_PREFIX, DEFAULT_BASE_URL, FileChatConfig, FileConfig,
    FileEndpointConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
