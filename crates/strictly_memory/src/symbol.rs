//! Card symbols and the alphabet they are drawn from.

use super::SetupError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// The face value of a card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}", _0)]
pub struct Symbol(char);

impl Symbol {
    /// Creates a symbol from a character.
    pub const fn new(c: char) -> Self {
        Self(c)
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c)
    }
}

/// An ordered, duplicate-free set of symbols.
///
/// Decks take their pairs from the front of the alphabet, so a 4x4 board
/// on the default alphabet uses `A` through `H`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an alphabet, rejecting repeated symbols.
    #[instrument(skip(symbols))]
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, SetupError> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(*symbol) {
                return Err(SetupError::DuplicateSymbol(*symbol));
            }
        }
        Ok(Self { symbols })
    }

    /// Creates an alphabet from the characters of a string.
    pub fn from_chars(chars: &str) -> Result<Self, SetupError> {
        Self::new(chars.chars().map(Symbol::new))
    }

    /// The uppercase Latin letters `A..=Z`.
    pub fn latin() -> Self {
        Self {
            symbols: ('A'..='Z').map(Symbol::new).collect(),
        }
    }

    /// Returns the symbols in order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_chars(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.iter().map(|s| s.as_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_alphabet() {
        let alphabet = Alphabet::latin();
        assert_eq!(alphabet.len(), 26);
        assert_eq!(alphabet.symbols()[0], Symbol::new('A'));
        assert_eq!(alphabet.symbols()[25], Symbol::new('Z'));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result = Alphabet::from_chars("ABCA");
        assert_eq!(result, Err(SetupError::DuplicateSymbol(Symbol::new('A'))));
    }

    #[test]
    fn test_string_round_trip_through_serde() {
        let alphabet = Alphabet::from_chars("★♠♥").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"★♠♥\"");
        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alphabet);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let result: Result<Alphabet, _> = serde_json::from_str("\"XYX\"");
        assert!(result.is_err());
    }
}
