//! Score bookkeeping: points equal pairs found.

use super::super::GameSession;
use super::Invariant;

/// Invariant: the score total equals the matched pairs on the board and the
/// matching moves in history, and never exceeds the pairs on the board.
pub struct ScoreMatchesPairsInvariant;

impl Invariant<GameSession> for ScoreMatchesPairsInvariant {
    fn holds(game: &GameSession) -> bool {
        let total = game.scores().total() as usize;
        let matching_moves = game.move_history().iter().filter(|m| m.is_match()).count();

        total == game.board().matched_pairs()
            && total == matching_moves
            && total <= game.board().dimensions().pair_count()
    }

    fn description() -> &'static str {
        "Score total equals pairs matched"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player, Position, Symbol};

    #[test]
    fn test_holds_through_a_game() {
        let board = Board::construct(2, 2, "ABAB".chars().map(Symbol::new).collect()).unwrap();
        let mut game = GameSession::new(board);
        assert!(ScoreMatchesPairsInvariant::holds(&game));

        game.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();
        assert!(ScoreMatchesPairsInvariant::holds(&game));

        game.play_turn(Position::new(0, 1), Position::new(1, 1)).unwrap();
        assert!(ScoreMatchesPairsInvariant::holds(&game));
    }

    #[test]
    fn test_unearned_point_violates() {
        let board = Board::construct(2, 2, "ABAB".chars().map(Symbol::new).collect()).unwrap();
        let mut game = GameSession::new(board);
        game.scores.award(Player::One);
        assert!(!ScoreMatchesPairsInvariant::holds(&game));
    }
}
