//! History consistency: the board is exactly what the move history says.

use super::super::{Board, GameSession, TurnState};
use super::Invariant;

/// Invariant: the move history accounts for the board.
///
/// - every matching move names two matched cards with the same symbol
/// - every non-matching move names two cards with different symbols
/// - matched cards are exactly those named by matching moves
/// - the only unmatched face-up card is the pending pick of an in-flight turn
pub struct HistoryConsistentInvariant;

impl HistoryConsistentInvariant {
    fn moves_agree_with_board(board: &Board, game: &GameSession) -> bool {
        let mut claimed = vec![false; board.cards().len()];
        for mv in game.move_history() {
            let (first, second) = mv.positions();
            let (Some(a), Some(b)) = (board.card(first), board.card(second)) else {
                return false;
            };
            if (a.symbol() == b.symbol()) != mv.is_match() {
                return false;
            }
            if mv.is_match() {
                for pos in [first, second] {
                    let Some(index) = board.dimensions().index_of(pos) else {
                        return false;
                    };
                    if claimed[index] || !board.cards()[index].is_matched() {
                        return false;
                    }
                    claimed[index] = true;
                }
            }
        }
        board
            .cards()
            .iter()
            .zip(&claimed)
            .all(|(card, claimed)| card.is_matched() == *claimed)
    }
}

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(game: &GameSession) -> bool {
        let board = game.board();
        if !Self::moves_agree_with_board(board, game) {
            return false;
        }

        let pending = match game.turn_state() {
            TurnState::AwaitingSecondPick { first } => Some(first),
            _ => None,
        };
        board
            .dimensions()
            .positions()
            .zip(board.cards())
            .filter(|(_, card)| card.is_revealed() && !card.is_matched())
            .all(|(pos, _)| Some(pos) == pending)
    }

    fn description() -> &'static str {
        "Move history accounts for every matched and face-up card"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Symbol};

    fn game() -> GameSession {
        let board = Board::construct(2, 2, "ABAB".chars().map(Symbol::new).collect()).unwrap();
        GameSession::new(board)
    }

    #[test]
    fn test_holds_with_pending_pick() {
        let mut game = game();
        game.pick(Position::new(0, 0)).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_stray_face_up_card_violates() {
        let mut game = game();
        game.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();
        game.board.card_mut(Position::new(1, 1)).unwrap().revealed = true;
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_unrecorded_match_violates() {
        let mut game = game();
        for pos in [Position::new(0, 1), Position::new(1, 1)] {
            let card = game.board.card_mut(pos).unwrap();
            card.revealed = true;
            card.matched = true;
        }
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
