//! Players, scores, and final outcomes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One of the two players. `One` always starts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Player {
    /// First player.
    #[strum(serialize = "player1")]
    #[serde(rename = "player1")]
    One,
    /// Second player.
    #[strum(serialize = "player2")]
    #[serde(rename = "player2")]
    Two,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// One-based player number.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Matched pairs per player. Counts only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    player1: u32,
    player2: u32,
}

impl Scoreboard {
    /// Score of a player.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Sum of both scores.
    pub fn total(&self) -> u32 {
        self.player1 + self.player2
    }

    /// Outcome if the game ended with these scores.
    pub fn outcome(&self) -> Outcome {
        match self.player1.cmp(&self.player2) {
            Ordering::Greater => Outcome::Winner(Player::One),
            Ordering::Less => Outcome::Winner(Player::Two),
            Ordering::Equal => Outcome::Draw,
        }
    }

    pub(crate) fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player found more pairs.
    Winner(Player),
    /// Both players found the same number of pairs.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player.number()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
