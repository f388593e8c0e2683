//! Symbol alphabets.
//!
//! An [`Alphabet`] is an ordered set of distinct characters. Order matters:
//! it fixes the identifier each symbol receives and, for the first 64
//! symbols, the transport character for each 6-bit chunk. Sender and
//! receiver must agree on it exactly; nothing in the wire format checks.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// The URL-safe alphabet: 66 unreserved characters followed by the
/// 19 reserved ones. Its first 64 entries form the transport alphabet.
pub const URL_SAFE: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_.~:/?#[]@!$&'()*+,;=%";

/// Smallest alphabet an identifier table can be built over.
pub const MIN_SYMBOLS: usize = 2;

/// An ordered set of distinct symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from symbols in order.
    ///
    /// # Errors
    /// `Error::DuplicateSymbol` if a symbol repeats, `Error::AlphabetTooSmall`
    /// if fewer than [`MIN_SYMBOLS`] symbols are given.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &ch) in symbols.iter().enumerate() {
            if index.insert(ch, i).is_some() {
                return Err(Error::DuplicateSymbol(ch));
            }
        }
        if symbols.len() < MIN_SYMBOLS {
            return Err(Error::AlphabetTooSmall {
                len: symbols.len(),
                min: MIN_SYMBOLS,
            });
        }
        Ok(Self { symbols, index })
    }

    /// The 85-symbol [`URL_SAFE`] alphabet.
    pub fn url() -> Self {
        let symbols: Vec<char> = URL_SAFE.chars().collect();
        let index: HashMap<char, usize> =
            symbols.iter().enumerate().map(|(i, &ch)| (ch, i)).collect();
        debug_assert_eq!(index.len(), symbols.len(), "URL_SAFE repeats a symbol");
        Self { symbols, index }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Symbol at `index`.
    pub fn get(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Position of `symbol`.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::url()
    }
}
