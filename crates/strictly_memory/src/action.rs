//! First-class turn records.
//!
//! A completed turn is a domain event: who picked which two cards and
//! whether they matched. The move history is a list of these, used for
//! replay and audit.

use super::{Player, Position, Symbol};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    player: Player,
    first: Position,
    second: Position,
    matched: bool,
}

impl Move {
    /// The player who took the turn.
    pub fn player(&self) -> Player {
        self.player
    }

    /// First card picked.
    pub fn first(&self) -> Position {
        self.first
    }

    /// Second card picked.
    pub fn second(&self) -> Position {
        self.second
    }

    /// The ordered pair of picks.
    pub fn positions(&self) -> (Position, Position) {
        (self.first, self.second)
    }

    /// Whether the two cards matched.
    pub fn is_match(&self) -> bool {
        self.matched
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.matched { "match" } else { "no match" };
        write!(f, "{}: {} & {} -> {}", self.player, self.first, self.second, verdict)
    }
}

/// What a completed turn did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TurnReport {
    /// The recorded move.
    played: Move,
    /// Symbols under the first and second pick.
    symbols: (Symbol, Symbol),
    /// Player to act next (unchanged once the game is over).
    next_player: Player,
    /// Whether this turn ended the game.
    game_over: bool,
}

impl TurnReport {
    pub(crate) fn new(played: Move, symbols: (Symbol, Symbol), next_player: Player, game_over: bool) -> Self {
        Self {
            played,
            symbols,
            next_player,
            game_over,
        }
    }
}

/// Result of a single accepted pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickOutcome {
    /// The first card of the turn is now face up.
    FirstRevealed {
        /// Where it was picked.
        position: Position,
        /// Its symbol.
        symbol: Symbol,
    },
    /// The second card was revealed and the turn resolved.
    TurnCompleted(TurnReport),
}
