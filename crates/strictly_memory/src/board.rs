//! The memory board: symbols placed on a grid plus per-card visibility.
//!
//! Symbols are fixed at construction. Only the `revealed` and `matched`
//! flags change afterwards, and only through the crate-private mutators
//! driven by the turn engine.

use super::{Card, ContractError, Dimensions, PickError, Position, SetupError, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A rectangular grid of paired cards.
///
/// Deserialization goes through the same checks as [`Board::construct`],
/// plus consistency of the stored `revealed` / `matched` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    dimensions: Dimensions,
    /// Cards in row-major order.
    pub(crate) cards: Vec<Card>,
}

impl Board {
    /// Places `symbols` on a `rows x columns` grid in row-major order.
    ///
    /// All cards start face down and unmatched.
    ///
    /// # Errors
    ///
    /// - [`SetupError::InvalidBoardSize`] if the area is odd or zero
    /// - [`SetupError::CardCountMismatch`] if the symbol count differs from the area
    /// - [`SetupError::PairingViolation`] if a symbol does not occur exactly twice
    #[instrument(skip(symbols), fields(symbol_count = symbols.len()))]
    pub fn construct(rows: usize, columns: usize, symbols: Vec<Symbol>) -> Result<Self, SetupError> {
        let dimensions = Dimensions::paired(rows, columns)?;
        if symbols.len() != dimensions.cell_count() {
            return Err(SetupError::CardCountMismatch {
                expected: dimensions.cell_count(),
                actual: symbols.len(),
            });
        }

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for symbol in &symbols {
            *counts.entry(*symbol).or_insert(0) += 1;
        }
        if let Some((symbol, count)) = counts.into_iter().find(|(_, count)| *count != 2) {
            return Err(SetupError::PairingViolation { symbol, count });
        }

        debug!(%dimensions, "Board constructed");
        Ok(Self {
            dimensions,
            cards: symbols.into_iter().map(Card::face_down).collect(),
        })
    }

    /// Returns the board dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the card at a position.
    pub fn card(&self, pos: Position) -> Option<&Card> {
        self.dimensions.index_of(pos).and_then(|i| self.cards.get(i))
    }

    /// Returns all cards in row-major order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the fixed symbol layout in row-major order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cards.iter().map(Card::symbol).collect()
    }

    /// Number of pairs already matched.
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count() / 2
    }

    /// True iff every card is matched.
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|c| c.matched)
    }

    /// Positions of cards that are currently face down.
    pub fn hidden_positions(&self) -> Vec<Position> {
        self.dimensions
            .positions()
            .zip(&self.cards)
            .filter(|(_, card)| !card.revealed)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// The same layout with every card face down and unmatched.
    pub fn face_down_copy(&self) -> Self {
        Self {
            dimensions: self.dimensions,
            cards: self.cards.iter().map(|c| Card::face_down(c.symbol)).collect(),
        }
    }

    /// Read-only visibility view for renderers.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            dimensions: self.dimensions,
            cells: self
                .dimensions
                .positions()
                .zip(&self.cards)
                .map(|(position, card)| CellView {
                    position,
                    visible: card.revealed,
                    symbol: card.visible_symbol(),
                })
                .collect(),
        }
    }

    /// Flips a face-down card up and returns it.
    #[instrument(skip(self))]
    pub(crate) fn reveal(&mut self, pos: Position) -> Result<&Card, PickError> {
        let index = self
            .dimensions
            .index_of(pos)
            .ok_or(PickError::OutOfBounds(pos))?;
        let card = &mut self.cards[index];
        if card.revealed || card.matched {
            return Err(PickError::AlreadyRevealedOrMatched(pos));
        }
        card.revealed = true;
        debug!(symbol = %card.symbol, "Card revealed");
        Ok(card)
    }

    /// Flips an unmatched card back down.
    #[instrument(skip(self))]
    pub(crate) fn hide(&mut self, pos: Position) -> Result<(), ContractError> {
        let card = self.card_mut(pos)?;
        if card.matched {
            return Err(ContractError::InvalidHideOfMatchedCard(pos));
        }
        card.revealed = false;
        Ok(())
    }

    /// Permanently resolves a card; it stays face up.
    #[instrument(skip(self))]
    pub(crate) fn mark_matched(&mut self, pos: Position) -> Result<(), ContractError> {
        let card = self.card_mut(pos)?;
        card.matched = true;
        card.revealed = true;
        Ok(())
    }

    pub(crate) fn card_mut(&mut self, pos: Position) -> Result<&mut Card, ContractError> {
        self.dimensions
            .index_of(pos)
            .and_then(|i| self.cards.get_mut(i))
            .ok_or(ContractError::UnknownPosition(pos))
    }
}

/// Stored form of a [`Board`], validated before use.
#[derive(Deserialize)]
struct BoardRecord {
    dimensions: Dimensions,
    cards: Vec<CardRecord>,
}

#[derive(Deserialize)]
struct CardRecord {
    symbol: Symbol,
    revealed: bool,
    matched: bool,
}

impl TryFrom<BoardRecord> for Board {
    type Error = SetupError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let BoardRecord { dimensions, cards } = record;
        let symbols = cards.iter().map(|c| c.symbol).collect();
        let mut board = Self::construct(dimensions.rows(), dimensions.columns(), symbols)?;

        let mut matched: BTreeMap<Symbol, usize> = BTreeMap::new();
        for ((pos, card), stored) in dimensions.positions().zip(board.cards.iter_mut()).zip(&cards) {
            if stored.matched && !stored.revealed {
                return Err(SetupError::MatchedFaceDown(pos));
            }
            if stored.matched {
                *matched.entry(stored.symbol).or_insert(0) += 1;
            }
            card.revealed = stored.revealed;
            card.matched = stored.matched;
        }
        if let Some((symbol, _)) = matched.into_iter().find(|(_, count)| *count != 2) {
            return Err(SetupError::HalfMatchedPair(symbol));
        }

        Ok(board)
    }
}

/// Visibility of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Where the cell is.
    pub position: Position,
    /// Whether the card is face up.
    pub visible: bool,
    /// The symbol, present only when visible.
    pub symbol: Option<Symbol>,
}

/// Read-only visibility view of the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    dimensions: Dimensions,
    cells: Vec<CellView>,
}

impl BoardSnapshot {
    /// Board dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    /// The cell at a position.
    pub fn cell(&self, pos: Position) -> Option<&CellView> {
        self.dimensions.index_of(pos).and_then(|i| self.cells.get(i))
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.dimensions.columns().max(1))
    }
}
