//! First-class invariants for the memory game.
//!
//! Invariants are logical properties that must hold between turns.
//! They are testable independently and are checked after every completed
//! turn in debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        tracing::warn!(invariant = I::description(), "Invariant violated");
        violations.push(InvariantViolation::new(I::description()));
    }
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        check::<S, I4>(state, &mut violations);
        collect(violations)
    }
}

// Implement InvariantSet for 3-tuples
impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

pub mod history_consistent;
pub mod matched_revealed;
pub mod pairing;
pub mod score_pairs;

pub use history_consistent::HistoryConsistentInvariant;
pub use matched_revealed::MatchedImpliesRevealedInvariant;
pub use pairing::PairingInvariant;
pub use score_pairs::ScoreMatchesPairsInvariant;

/// All memory-game invariants as a composable set.
pub type MemoryInvariants = (
    PairingInvariant,
    MatchedImpliesRevealedInvariant,
    ScoreMatchesPairsInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameSession, Position, Symbol};

    fn session() -> GameSession {
        let symbols = "ABCDABCD".chars().map(Symbol::new).collect();
        GameSession::new(Board::construct(2, 4, symbols).unwrap())
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(MemoryInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_turns() {
        let mut game = session();
        game.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();
        game.play_turn(Position::new(0, 2), Position::new(1, 2)).unwrap();
        assert!(MemoryInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = session();
        game.play_turn(Position::new(0, 0), Position::new(1, 0)).unwrap();

        // Un-match one card of the scored pair
        game.board.card_mut(Position::new(1, 0)).unwrap().matched = false;

        let violations = MemoryInvariants::check_all(&game).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PairingInvariant, MatchedImpliesRevealedInvariant);
        assert!(TwoInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_three_invariants_as_set() {
        type BoardAndScore = (
            PairingInvariant,
            MatchedImpliesRevealedInvariant,
            ScoreMatchesPairsInvariant,
        );
        let mut game = session();
        assert!(BoardAndScore::check_all(&game).is_ok());

        game.scores.award(crate::Player::One);

        let violations = BoardAndScore::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, "Score total equals pairs matched");
    }
}
