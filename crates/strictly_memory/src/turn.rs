//! Turn engine: the pick / pick / resolve state machine.
//!
//! ```text
//! AwaitingFirstPick --pick--> AwaitingSecondPick --pick--> Resolving --resolve--> TurnComplete
//!        ^                           |                                                |
//!        +--------abandon------------+---------------------reset----------------------+
//! ```
//!
//! Rejected picks leave the state untouched so the caller can retry the
//! same step.

use super::{Board, ContractError, Move, PickError, Player, Position, Symbol, TurnError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnState {
    /// No card picked yet.
    #[default]
    AwaitingFirstPick,
    /// One card face up, waiting for the second.
    AwaitingSecondPick {
        /// The first pick.
        first: Position,
    },
    /// Both cards face up, not yet compared.
    Resolving {
        /// The first pick.
        first: Position,
        /// The second pick.
        second: Position,
    },
    /// Turn resolved; the move is ready to record.
    TurnComplete(Move),
}

/// Drives a single turn against a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEngine {
    state: TurnState,
}

impl TurnEngine {
    /// Creates an engine awaiting its first pick.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The first pick of the in-flight turn, if any.
    pub fn pending_pick(&self) -> Option<Position> {
        match self.state {
            TurnState::AwaitingSecondPick { first } | TurnState::Resolving { first, .. } => Some(first),
            _ => None,
        }
    }

    /// `AwaitingFirstPick -> AwaitingSecondPick`.
    #[instrument(skip(self, board))]
    pub(crate) fn pick_first(&mut self, board: &mut Board, position: Position) -> Result<Symbol, TurnError> {
        if self.state != TurnState::AwaitingFirstPick {
            return Err(ContractError::UnexpectedState(self.state).into());
        }
        let symbol = board.reveal(position)?.symbol();
        self.state = TurnState::AwaitingSecondPick { first: position };
        debug!(state = ?self.state, "First pick accepted");
        Ok(symbol)
    }

    /// `AwaitingSecondPick -> Resolving`.
    ///
    /// A repeat of the first pick is rejected before the board is touched.
    #[instrument(skip(self, board))]
    pub(crate) fn pick_second(&mut self, board: &mut Board, position: Position) -> Result<Symbol, TurnError> {
        let TurnState::AwaitingSecondPick { first } = self.state else {
            return Err(ContractError::UnexpectedState(self.state).into());
        };
        if position == first {
            return Err(PickError::DuplicatePick(position).into());
        }
        let symbol = board.reveal(position)?.symbol();
        self.state = TurnState::Resolving {
            first,
            second: position,
        };
        debug!(state = ?self.state, "Second pick accepted");
        Ok(symbol)
    }

    /// `Resolving -> TurnComplete`.
    ///
    /// Matching cards are marked matched; others are flipped back down.
    #[instrument(skip(self, board))]
    pub(crate) fn resolve(&mut self, board: &mut Board, player: Player) -> Result<Move, ContractError> {
        let TurnState::Resolving { first, second } = self.state else {
            return Err(ContractError::UnexpectedState(self.state));
        };
        let symbol_of = |pos| board.card(pos).map(|c| c.symbol()).ok_or(ContractError::UnknownPosition(pos));
        let matched = symbol_of(first)? == symbol_of(second)?;

        if matched {
            board.mark_matched(first)?;
            board.mark_matched(second)?;
        } else {
            board.hide(first)?;
            board.hide(second)?;
        }

        let played = Move::new(player, first, second, matched);
        self.state = TurnState::TurnComplete(played);
        debug!(%played, "Turn resolved");
        Ok(played)
    }

    /// `AwaitingSecondPick -> AwaitingFirstPick`, flipping the first card back.
    #[instrument(skip(self, board))]
    pub(crate) fn abandon(&mut self, board: &mut Board) -> Result<(), ContractError> {
        let TurnState::AwaitingSecondPick { first } = self.state else {
            return Err(ContractError::UnexpectedState(self.state));
        };
        board.hide(first)?;
        self.state = TurnState::AwaitingFirstPick;
        Ok(())
    }

    /// `TurnComplete -> AwaitingFirstPick`.
    pub(crate) fn reset(&mut self) -> Result<Move, ContractError> {
        let TurnState::TurnComplete(played) = self.state else {
            return Err(ContractError::UnexpectedState(self.state));
        };
        self.state = TurnState::AwaitingFirstPick;
        Ok(played)
    }
}
