//! Deck building and shuffling.
//!
//! The deck is the multiset of symbols dealt onto the board: the first
//! `rows * columns / 2` symbols of the alphabet, each exactly twice, in a
//! uniformly random order. The permutation source is the [`Shuffle`] trait,
//! so tests can pin the order with a seed or skip shuffling entirely.

use super::{Alphabet, Dimensions, SetupError, Symbol};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// A source of permutations for a dealt deck.
pub trait Shuffle {
    /// Permutes the symbols in place.
    fn shuffle(&mut self, symbols: &mut [Symbol]);
}

/// Deterministic Fisher-Yates shuffle seeded from a `u64`.
///
/// The same seed always produces the same deck.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededShuffle {
    /// Creates a shuffle from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this shuffle started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Shuffle for SeededShuffle {
    fn shuffle(&mut self, symbols: &mut [Symbol]) {
        symbols.shuffle(&mut self.rng);
    }
}

/// Fisher-Yates shuffle seeded from operating system entropy.
#[derive(Debug, Clone)]
pub struct EntropyShuffle {
    rng: ChaCha8Rng,
}

impl EntropyShuffle {
    /// Creates a shuffle with a fresh random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for EntropyShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffle for EntropyShuffle {
    fn shuffle(&mut self, symbols: &mut [Symbol]) {
        symbols.shuffle(&mut self.rng);
    }
}

/// Leaves the deck in deal order (`A A B B C C ...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShuffle;

impl Shuffle for NoShuffle {
    fn shuffle(&mut self, _symbols: &mut [Symbol]) {}
}

/// Builds paired decks from an alphabet.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    alphabet: Alphabet,
}

impl DeckBuilder {
    /// Creates a builder drawing from the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// The alphabet symbols are drawn from.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Builds a shuffled deck for a `rows x columns` board.
    ///
    /// # Errors
    ///
    /// - [`SetupError::InvalidBoardSize`] if the area is odd or zero
    /// - [`SetupError::AlphabetExhausted`] if the alphabet is too small
    #[instrument(skip(self, shuffler), fields(alphabet_len = self.alphabet.len()))]
    pub fn build(
        &self,
        rows: usize,
        columns: usize,
        shuffler: &mut impl Shuffle,
    ) -> Result<Vec<Symbol>, SetupError> {
        let dims = Dimensions::paired(rows, columns)?;
        let needed = dims.pair_count();
        if needed > self.alphabet.len() {
            return Err(SetupError::AlphabetExhausted {
                needed,
                available: self.alphabet.len(),
            });
        }

        let mut deck: Vec<Symbol> = self.alphabet.symbols()[..needed]
            .iter()
            .flat_map(|symbol| [*symbol, *symbol])
            .collect();
        shuffler.shuffle(&mut deck);

        debug!(cards = deck.len(), pairs = needed, "Deck built");
        Ok(deck)
    }
}
