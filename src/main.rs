//! Forca - Unified CLI
//!
//! Terminal hangman, plus a one-shot word generator.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use forca::{Difficulty, ForcaConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, log_file } => run_play(config, log_file).await,
        Command::Word {
            topic,
            difficulty,
            strict,
            config,
        } => run_word(topic, difficulty, strict, config).await,
    }
}

/// Run the terminal game
async fn run_play(config: Option<PathBuf>, log_file: PathBuf) -> Result<()> {
    let config = ForcaConfig::load(config.as_deref())?;
    forca::tui::run_tui(config, &log_file).await
}

/// Generate one word and print it
#[instrument(skip_all, fields(topic = ?topic, %difficulty))]
async fn run_word(
    topic: Option<String>,
    difficulty: Difficulty,
    strict: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ForcaConfig::load(config.as_deref())?;
    let source = config.word_source();
    info!(online = source.is_online(), "Requesting word");

    let word = if strict {
        source.try_fetch_word(topic.as_deref(), difficulty).await?
    } else {
        source.fetch_word(topic.as_deref(), difficulty).await
    };

    println!("{}", serde_json::to_string_pretty(&word)?);
    Ok(())
}
