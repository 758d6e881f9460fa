//! Contract-based validation for picks and turns.
//!
//! Contracts define correctness through preconditions and postconditions,
//! in the Hoare style `{P} action {Q}`. Preconditions are always checked
//! before a pick touches the board; postconditions run after each
//! completed turn in debug builds.

use super::invariants::{InvariantSet, MemoryInvariants};
use super::{ContractError, GameSession, PickError, Position, TurnError};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TurnError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TurnError>;
}

// ─────────────────────────────────────────────────────────────
//  Pick Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must still be running.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects every pick once the game is over.
    #[instrument(skip(game))]
    pub fn check(game: &GameSession) -> Result<(), PickError> {
        if game.is_over() {
            Err(PickError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the position must be on the board.
pub struct PositionOnBoard;

impl PositionOnBoard {
    /// Rejects positions outside the grid.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameSession) -> Result<(), PickError> {
        if game.board().dimensions().contains(pos) {
            Ok(())
        } else {
            Err(PickError::OutOfBounds(pos))
        }
    }
}

/// Precondition: the second pick must differ from the first.
pub struct DistinctFromFirstPick;

impl DistinctFromFirstPick {
    /// Rejects repeating the pending first pick.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameSession) -> Result<(), PickError> {
        if game.pending_pick() == Some(pos) {
            Err(PickError::DuplicatePick(pos))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the card must be face down and unmatched.
pub struct CardFaceDown;

impl CardFaceDown {
    /// Rejects face-up and matched cards.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameSession) -> Result<(), PickError> {
        match game.board().card(pos) {
            Some(card) if card.is_revealed() || card.is_matched() => {
                Err(PickError::AlreadyRevealedOrMatched(pos))
            }
            Some(_) => Ok(()),
            None => Err(PickError::OutOfBounds(pos)),
        }
    }
}

/// Composite precondition: a pick is legal if the game is running, the
/// position is on the board, it is not a repeat, and the card is face down.
pub struct LegalPick;

impl LegalPick {
    /// Validates all preconditions for a pick, in the order a player would
    /// expect to hear about them.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameSession) -> Result<(), PickError> {
        GameNotOver::check(game)?;
        PositionOnBoard::check(pos, game)?;
        DistinctFromFirstPick::check(pos, game)?;
        CardFaceDown::check(pos, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Turn Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for picks and the turns they complete.
///
/// Preconditions:
/// - Game is not over
/// - Position is on the board, not a repeat, and face down
///
/// Postconditions:
/// - All memory invariants hold
/// - Scores never decrease
/// - History grows by exactly one move per completed turn
/// - A finished game stays finished
/// - Symbols never move
pub struct TurnContract;

impl Contract<GameSession, Position> for TurnContract {
    fn pre(game: &GameSession, pos: &Position) -> Result<(), TurnError> {
        Ok(LegalPick::check(*pos, game)?)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), TurnError> {
        MemoryInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ContractError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let monotonic = [
            (
                after.scores().total() >= before.scores().total(),
                "scores decreased",
            ),
            (
                after.move_history().len() == before.move_history().len() + 1
                    && after.move_history().starts_with(before.move_history()),
                "history was not extended by exactly one move",
            ),
            (before.is_over() <= after.is_over(), "finished game resumed"),
            (
                after.board().symbols() == before.board().symbols(),
                "board symbols changed",
            ),
        ];
        for (holds, description) in monotonic {
            if !holds {
                warn!(description, "Turn postcondition violated");
                return Err(ContractError::InvariantViolation(format!(
                    "Postcondition failed: {}",
                    description
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Symbol};

    fn game() -> GameSession {
        let board = Board::construct(2, 2, "ABAB".chars().map(Symbol::new).collect()).unwrap();
        GameSession::new(board)
    }

    #[test]
    fn test_precondition_face_down_card() {
        let game = game();
        assert!(TurnContract::pre(&game, &Position::new(0, 0)).is_ok());
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let game = game();
        let pos = Position::new(0, 2);
        assert_eq!(
            TurnContract::pre(&game, &pos),
            Err(PickError::OutOfBounds(pos).into())
        );
    }

    #[test]
    fn test_precondition_duplicate_before_face_up() {
        let mut game = game();
        let pos = Position::new(1, 1);
        game.pick(pos).unwrap();
        assert_eq!(
            TurnContract::pre(&game, &pos),
            Err(PickError::DuplicatePick(pos).into())
        );
    }

    #[test]
    fn test_precondition_matched_card() {
        let mut game = game();
        game.play_turn(Position::new(0, 0), Position::new(1, 0)).unwrap();
        let pos = Position::new(0, 0);
        assert_eq!(
            TurnContract::pre(&game, &pos),
            Err(PickError::AlreadyRevealedOrMatched(pos).into())
        );
    }

    #[test]
    fn test_precondition_game_over() {
        let mut game = game();
        game.play_turn(Position::new(0, 0), Position::new(1, 0)).unwrap();
        game.play_turn(Position::new(0, 1), Position::new(1, 1)).unwrap();
        assert_eq!(
            TurnContract::pre(&game, &Position::new(0, 0)),
            Err(PickError::GameOver.into())
        );
    }

    #[test]
    fn test_postcondition_holds_after_turn() {
        let before = game();
        let mut after = before.clone();
        after.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();
        assert!(TurnContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_history() {
        let before = game();
        let after = before.clone();
        assert!(TurnContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = game();
        let mut after = before.clone();
        after.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();

        // Leave a stray card face up
        after.board.card_mut(Position::new(1, 1)).unwrap().revealed = true;

        assert!(TurnContract::post(&before, &after).is_err());
    }
}
