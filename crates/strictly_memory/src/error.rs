//! Error types for board setup and turn play.
//!
//! Errors fall into three groups:
//! - [`SetupError`]: the board could not be built; fatal to session creation
//! - [`PickError`]: a rejected pick; recoverable, nothing was mutated
//! - [`ContractError`]: an internal contract was broken; a defect, never user input

use super::{Position, Symbol, TurnState};

/// Error raised while building a deck, alphabet, or board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// The board area is odd or zero, so cards cannot be paired.
    #[display("A {}x{} board cannot be filled with pairs", rows, columns)]
    InvalidBoardSize {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },

    /// More distinct pairs are needed than the alphabet supplies.
    #[display("Board needs {} distinct symbols but the alphabet only has {}", needed, available)]
    AlphabetExhausted {
        /// Distinct symbols required.
        needed: usize,
        /// Distinct symbols available.
        available: usize,
    },

    /// The symbol sequence does not cover the grid exactly.
    #[display("Expected {} symbols for the board, got {}", expected, actual)]
    CardCountMismatch {
        /// Cells on the board.
        expected: usize,
        /// Symbols supplied.
        actual: usize,
    },

    /// A symbol does not occur exactly twice.
    #[display("Symbol {} occurs {} times, expected exactly 2", symbol, count)]
    PairingViolation {
        /// The offending symbol.
        symbol: Symbol,
        /// How many times it occurs.
        count: usize,
    },

    /// An alphabet listed the same symbol twice.
    #[display("Symbol {} appears more than once in the alphabet", _0)]
    DuplicateSymbol(Symbol),

    /// A stored card is marked matched while face down.
    #[display("Card at {} is matched but face down", _0)]
    MatchedFaceDown(Position),

    /// Only one card of a pair is marked matched.
    #[display("Only one card of pair {} is matched", _0)]
    HalfMatchedPair(Symbol),
}

impl std::error::Error for SetupError {}

/// A rejected pick. The caller should re-prompt for the same pick step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PickError {
    /// The position lies outside the grid.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(Position),

    /// The card is already face up or already matched.
    #[display("Card at {} is already revealed", _0)]
    AlreadyRevealedOrMatched(Position),

    /// The second pick repeats the first.
    #[display("Card at {} was already picked this turn", _0)]
    DuplicatePick(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for PickError {}

/// A broken internal contract. Never caused by player input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ContractError {
    /// Attempted to flip a matched card back down.
    #[display("Matched card at {} cannot be hidden", _0)]
    InvalidHideOfMatchedCard(Position),

    /// A board mutation addressed a cell that does not exist.
    #[display("No card at {}", _0)]
    UnknownPosition(Position),

    /// The turn engine was driven out of order.
    #[display("Operation not allowed in turn state {:?}", _0)]
    UnexpectedState(TurnState),

    /// A postcondition failed after a turn.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// A recorded move did not re-apply identically.
    #[display("Replay diverged from the recorded history at turn {}", _0)]
    ReplayDiverged(usize),
}

impl std::error::Error for ContractError {}

/// Any error raised while playing a turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum TurnError {
    /// Recoverable pick rejection.
    #[display("{}", _0)]
    Pick(PickError),

    /// Internal defect.
    #[display("{}", _0)]
    Contract(ContractError),
}

impl TurnError {
    /// Returns true if the caller may simply retry with another position.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TurnError::Pick(err) if *err != PickError::GameOver)
    }

    /// Returns the pick rejection, if this is one.
    pub fn as_pick(&self) -> Option<PickError> {
        match self {
            TurnError::Pick(err) => Some(*err),
            TurnError::Contract(_) => None,
        }
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::Pick(err) => Some(err),
            TurnError::Contract(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_errors_are_recoverable() {
        let pos = Position::new(0, 0);
        assert!(TurnError::from(PickError::OutOfBounds(pos)).is_recoverable());
        assert!(TurnError::from(PickError::AlreadyRevealedOrMatched(pos)).is_recoverable());
        assert!(TurnError::from(PickError::DuplicatePick(pos)).is_recoverable());
    }

    #[test]
    fn test_game_over_and_contract_errors_are_not_recoverable() {
        assert!(!TurnError::from(PickError::GameOver).is_recoverable());
        let err = TurnError::from(ContractError::InvalidHideOfMatchedCard(Position::new(1, 1)));
        assert!(!err.is_recoverable());
        assert_eq!(err.as_pick(), None);
    }

    #[test]
    fn test_display_messages() {
        let err = SetupError::InvalidBoardSize { rows: 3, columns: 3 };
        assert_eq!(err.to_string(), "A 3x3 board cannot be filled with pairs");

        let err = PickError::DuplicatePick(Position::new(0, 2));
        assert_eq!(err.to_string(), "Card at (0, 2) was already picked this turn");
    }
}
