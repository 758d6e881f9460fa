//! Pairing invariant: every symbol on the board occurs exactly twice.

use super::super::GameSession;
use super::Invariant;
use std::collections::HashMap;

/// Invariant: each symbol appears in exactly two cells.
///
/// Established when the board is constructed. Symbols never change
/// afterwards, so this can only fail if the board is corrupted.
pub struct PairingInvariant;

impl Invariant<GameSession> for PairingInvariant {
    fn holds(game: &GameSession) -> bool {
        let mut counts = HashMap::new();
        for card in game.board().cards() {
            *counts.entry(card.symbol()).or_insert(0usize) += 1;
        }
        counts.values().all(|&n| n == 2)
    }

    fn description() -> &'static str {
        "Every symbol occurs in exactly two cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Position, Symbol};

    #[test]
    fn test_fresh_board_holds() {
        let board = Board::construct(2, 2, "ABBA".chars().map(Symbol::new).collect()).unwrap();
        assert!(PairingInvariant::holds(&GameSession::new(board)));
    }

    #[test]
    fn test_overwritten_symbol_violates() {
        let board = Board::construct(2, 2, "ABBA".chars().map(Symbol::new).collect()).unwrap();
        let mut game = GameSession::new(board);
        game.board.card_mut(Position::new(0, 0)).unwrap().symbol = Symbol::new('B');
        assert!(!PairingInvariant::holds(&game));
    }
}
