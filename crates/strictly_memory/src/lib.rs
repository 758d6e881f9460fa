//! Strictly Memory - type-safe memory game logic
//!
//! A two-player matching game: a rectangular board of face-down cards where
//! every symbol occurs exactly twice. Players alternately reveal two cards,
//! score a point for each matching pair, and the game ends once every pair
//! has been found.
//!
//! # Architecture
//!
//! - **Deck**: builds the paired symbol multiset and shuffles it
//! - **Board**: places symbols row-major and tracks card visibility
//! - **Turn engine**: the pick / pick / resolve state machine
//! - **Session**: owns the board, scores, current player and move history
//! - **Invariants**: checkable properties verified after every turn
//!
//! # Example
//!
//! ```
//! use strictly_memory::{Board, GameSession, Position, Symbol};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let symbols = "ABAB".chars().map(Symbol::new).collect();
//! let board = Board::construct(2, 2, symbols)?;
//! let mut session = GameSession::new(board);
//!
//! let report = session.play_turn(Position::new(0, 0), Position::new(1, 0))?;
//! assert!(report.played().is_match());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod card;
mod config;
mod contracts;
mod deck;
mod error;
mod invariants;
mod player;
mod position;
mod session;
mod symbol;
mod turn;

pub use action::{Move, PickOutcome, TurnReport};
pub use board::{Board, BoardSnapshot, CellView};
pub use card::Card;
pub use config::{GameConfig, TurnPolicy};
pub use contracts::{
    CardFaceDown, Contract, DistinctFromFirstPick, GameNotOver, LegalPick, PositionOnBoard,
    TurnContract,
};
pub use deck::{DeckBuilder, EntropyShuffle, NoShuffle, SeededShuffle, Shuffle};
pub use error::{ContractError, PickError, SetupError, TurnError};
pub use invariants::{
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation,
    MatchedImpliesRevealedInvariant, MemoryInvariants, PairingInvariant,
    ScoreMatchesPairsInvariant,
};
pub use player::{Outcome, Player, Scoreboard};
pub use position::{Dimensions, Position};
pub use session::GameSession;
pub use symbol::{Alphabet, Symbol};
pub use turn::{TurnEngine, TurnState};
