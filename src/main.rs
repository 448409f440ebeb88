//! Meta tic-tac-toe terminal client.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use meta_tictactoe::{ClientConfig, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file so output never lands on the UI's screen
    let log_file = std::fs::File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = load_config(&cli)?;
    info!(
        api_url = %config.api_url(),
        starting_player = %config.starting_player(),
        "Configuration resolved"
    );

    run_tui(config).await
}

/// Layers file, environment and flags over the defaults.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_file(&cli.config)?.apply_env(|key| std::env::var(key).ok())?;

    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(player) = cli.starting_player {
        config = config.with_starting_player(player);
    }
    Ok(config)
}
