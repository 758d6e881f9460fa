//! Command-line interface for strictly_games.

use clap::Parser;
use std::path::PathBuf;
use strictly_memory::TurnPolicy;

/// Strictly Games - two-player memory game in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Two-player memory game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game config (defaults are used if it does not exist)
    #[arg(short, long, default_value = "strictly_memory.toml")]
    pub config: PathBuf,

    /// Board rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    pub columns: Option<usize>,

    /// Shuffle seed, for a reproducible deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Symbols to draw pairs from, e.g. "ABCDEFGH"
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Turn rule: always-alternate or extra-turn-on-match
    #[arg(long)]
    pub turn_policy: Option<TurnPolicy>,
}
