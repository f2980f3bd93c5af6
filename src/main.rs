// Companion - chat companion backend
// Main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use companion::billing::TOKEN_PACKAGES;
use companion::claude::{ClaudeClient, Message, CLAUDE_API_URL};
use companion::config::{load_config, Companion, Config};
use companion::conversation::{ConversationMetrics, Summarizer};
use companion::generators::ClaudeGenerator;

#[derive(Parser)]
#[command(name = "companion", version, about = "Chat companion backend")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Bind address, overrides config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print engagement metrics for a JSON message history
    Metrics {
        /// File containing a JSON array of {role, content}
        file: PathBuf,
    },
    /// Summarise a JSON message history with Claude
    Summarize {
        file: PathBuf,
    },
    /// List the token packages
    Packages,
    /// List the built-in companions
    Companions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    companion::logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Serve { bind } => {
            let mut config = load_config()?;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
                config.validate()?;
            }
            companion::server::serve(config).await
        }
        Command::Metrics { file } => {
            let messages = read_history(&file)?;
            let metrics = ConversationMetrics::compute(&messages);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            println!("{}", metrics.prompt_guidance());
            Ok(())
        }
        Command::Summarize { file } => {
            let config = load_config()?;
            let messages = read_history(&file)?;
            let summarizer = summarizer_from(&config)?;
            let summary = summarizer.summarize(&messages).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            let prose = summarizer.prose(&summary).await;
            if !prose.is_empty() {
                println!("\n{prose}");
            }
            Ok(())
        }
        Command::Packages => {
            for package in TOKEN_PACKAGES.iter() {
                let marker = if package.popular { " *" } else { "" };
                println!(
                    "{:<8} {:>5} tokens  ${}.{:02}{}",
                    package.id,
                    package.tokens,
                    package.price_cents / 100,
                    package.price_cents % 100,
                    marker
                );
            }
            Ok(())
        }
        Command::Companions => {
            for id in Companion::list_builtins() {
                let companion = Companion::load_builtin(id)?;
                println!("{:<8} {} - {}", id, companion.name, companion.description);
            }
            Ok(())
        }
    }
}

fn read_history(path: &Path) -> Result<Vec<Message>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of messages", path.display()))
}

fn summarizer_from(config: &Config) -> Result<Summarizer> {
    let client = ClaudeClient::with_base_url(
        config.anthropic.api_key.clone(),
        config
            .anthropic
            .base_url
            .clone()
            .unwrap_or_else(|| CLAUDE_API_URL.to_string()),
    )?;
    let generator = ClaudeGenerator::new(Arc::new(client), config.anthropic.model.clone());
    Ok(Summarizer::new(Arc::new(generator))
        .with_window(config.conversation.summary_window)
        .with_interval(config.conversation.summary_interval_turns))
}
