//! Game configuration.

use super::{Alphabet, Dimensions, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Who plays after a completed turn.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TurnPolicy {
    /// Alternate after every completed turn, match or not.
    #[default]
    AlwaysAlternate,
    /// A player who finds a pair plays again.
    ExtraTurnOnMatch,
}

impl TurnPolicy {
    /// Player who acts after `current` completes a turn.
    pub fn next_player(self, current: Player, matched: bool) -> Player {
        match self {
            TurnPolicy::ExtraTurnOnMatch if matched => current,
            _ => current.opponent(),
        }
    }
}

/// Settings for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board rows.
    #[serde(default = "default_rows")]
    rows: usize,

    /// Board columns.
    #[serde(default = "default_columns")]
    columns: usize,

    /// Symbols to draw pairs from.
    #[serde(default)]
    alphabet: Alphabet,

    /// Shuffle seed; a fresh random seed is used when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Turn-advance rule.
    #[serde(default)]
    turn_policy: TurnPolicy,
}

fn default_rows() -> usize {
    4
}

fn default_columns() -> usize {
    4
}

impl GameConfig {
    /// Creates a configuration for a `rows x columns` board with defaults elsewhere.
    #[instrument]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            alphabet: Alphabet::default(),
            seed: None,
            turn_policy: TurnPolicy::default(),
        }
    }

    /// Board dimensions (unvalidated).
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.columns)
    }

    /// Replaces the board size.
    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Replaces the alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Fixes the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the turn policy.
    pub fn with_turn_policy(mut self, turn_policy: TurnPolicy) -> Self {
        self.turn_policy = turn_policy;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_rows(), default_columns())
    }
}
