//! Game configuration loading: TOML file first, then command-line overrides.

use crate::cli::Cli;
use derive_more::{Display, Error};
use std::path::Path;
use strictly_memory::{Alphabet, GameConfig};
use tracing::{debug, info, instrument};

/// Loads the game config named by `cli.config` and applies the CLI overrides.
///
/// A missing config file is not an error; defaults are used instead.
#[instrument(skip(cli), fields(path = %cli.config.display()))]
pub fn load_game_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let config = if cli.config.exists() {
        from_file(&cli.config)?
    } else {
        info!("Config file not found, using defaults");
        GameConfig::default()
    };
    apply_overrides(config, cli)
}

/// Reads a game config from a TOML file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn from_file(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    debug!("Loading config from file");
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

    let config: GameConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

    info!(rows = *config.rows(), columns = *config.columns(), "Config loaded successfully");
    Ok(config)
}

/// Applies command-line overrides on top of a loaded config.
#[instrument(skip_all)]
pub fn apply_overrides(config: GameConfig, cli: &Cli) -> Result<GameConfig, ConfigError> {
    let rows = cli.rows.unwrap_or(*config.rows());
    let columns = cli.columns.unwrap_or(*config.columns());
    let mut config = config.with_size(rows, columns);

    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(chars) = &cli.alphabet {
        let alphabet = Alphabet::from_chars(chars)
            .map_err(|e| ConfigError::new(format!("Invalid alphabet: {}", e)))?;
        config = config.with_alphabet(alphabet);
    }
    if let Some(policy) = cli.turn_policy {
        config = config.with_turn_policy(policy);
    }

    debug!(?config, "Effective config");
    Ok(config)
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
