//! Strictly Games - memory game in the terminal
//!
//! Two players share one terminal and take turns revealing cards.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod harness;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use harness::Terminal;
use strictly_memory::GameSession;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    run(cli)
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip_all)]
fn run(cli: Cli) -> Result<()> {
    let config = config::load_game_config(&cli)?;
    let mut game = GameSession::from_config(&config)?;
    info!(
        rows = *config.rows(),
        columns = *config.columns(),
        policy = %config.turn_policy(),
        "Starting game"
    );

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    let outcome = terminal.play(&mut game)?;

    info!(%outcome, turns = game.move_history().len(), "Game finished");
    Ok(())
}
