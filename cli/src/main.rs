//! CLI entrypoint for TeachMeWow
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use teachmewow_application::{ChatGateway, ChatSession, SendMessageUseCase};
use teachmewow_infrastructure::{
    ConfigLoader, FileConfig, HttpChatGateway, JsonlConversationLogger,
};
use teachmewow_presentation::{ChatRepl, Cli, ConsoleObserver, OutputConfig, ReplConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(&cli);

    info!("Starting TeachMeWow");

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_ref()));
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {e}"))?;
    apply_cli_overrides(&cli, &mut config);

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("{}", issue);
        }
        bail!(
            "Invalid configuration: {}",
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    OutputConfig {
        color: config.output.color && !cli.no_color,
    }
    .apply();

    // === Dependency Injection ===
    let endpoint = config
        .endpoint
        .to_endpoint()
        .context("Invalid endpoint")?;
    let gateway = Arc::new(HttpChatGateway::new(
        endpoint,
        config.endpoint.connect_timeout(),
    )?);

    if cli.health {
        return check_health(gateway.as_ref()).await;
    }

    let params = config.chat_params()?;
    let mut use_case = SendMessageUseCase::new(gateway.clone());
    if let Some(path) = conversation_log_path(&cli, &config) {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Logging conversation to {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation log disabled"),
        }
    }

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
        };
        let mut repl = ChatRepl::new(use_case, ChatSession::new(&params))
            .with_config(repl_config)
            .with_endpoint(gateway.endpoint().stream_url().as_str());
        repl.run().await?;
        return Ok(());
    }

    // Single message mode - message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("A message is required. Use --chat for interactive mode."),
    };

    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });

    let use_case = use_case.with_cancellation(token);
    let mut session = ChatSession::new(&params.without_greeting());
    let observer = ConsoleObserver::new(config.repl.show_progress && !cli.quiet);
    let outcome = use_case.execute(&mut session, &message, &observer).await?;

    if let Some(error) = outcome.error() {
        bail!("Chat turn failed: {error}");
    }
    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    match &cli.log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "teachmewow.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}

fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(url) = &cli.url {
        config.endpoint.base_url = url.clone();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone();
    }
}

fn conversation_log_path(cli: &Cli, config: &FileConfig) -> Option<PathBuf> {
    cli.conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(PathBuf::from))
}

async fn check_health(gateway: &dyn ChatGateway) -> Result<()> {
    let status = gateway.health().await?;
    if status.is_healthy() {
        println!("Service is {}", status.status);
        Ok(())
    } else {
        bail!("Service reported status '{}'", status.status)
    }
}
