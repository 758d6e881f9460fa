//! A single card on the board.

use super::Symbol;
use serde::Serialize;

/// A card: its symbol plus visibility flags.
///
/// Invariant: `matched` implies `revealed`. Flags are only mutated by the
/// board on behalf of the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub(crate) symbol: Symbol,
    pub(crate) revealed: bool,
    pub(crate) matched: bool,
}

impl Card {
    /// Creates a face-down, unmatched card.
    pub(crate) fn face_down(symbol: Symbol) -> Self {
        Self {
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// The card's symbol.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// True while face up, including permanently after a match.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// True once the card has been paired.
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// The symbol if the card is face up.
    pub fn visible_symbol(&self) -> Option<Symbol> {
        self.revealed.then_some(self.symbol)
    }
}
