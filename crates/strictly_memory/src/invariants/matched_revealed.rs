//! Matched cards stay face up.

use super::super::GameSession;
use super::Invariant;

/// Invariant: `matched` implies `revealed` for every card.
pub struct MatchedImpliesRevealedInvariant;

impl Invariant<GameSession> for MatchedImpliesRevealedInvariant {
    fn holds(game: &GameSession) -> bool {
        game.board()
            .cards()
            .iter()
            .all(|card| !card.is_matched() || card.is_revealed())
    }

    fn description() -> &'static str {
        "Matched cards are always face up"
    }
}
