//! First-occurrence identifiers.
//!
//! The first time a symbol is coded its path leads to the placeholder leaf,
//! which says "new symbol" but not which one. The identifier that follows
//! names it. Identifiers use a phase-in binary code over the alphabet size
//! `N`: with `e = floor(log2 N)` and `r = N - 2^e`, the first `N - 2r`
//! symbols get `e`-bit codes starting at `r`, the last `2r` get `(e+1)`-bit
//! codes starting at 0. The `e`-bit codes never prefix an `(e+1)`-bit one,
//! so a reader can stop as soon as the bits seen so far match an entry.

use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::bits::BitField;

/// Symbol → identifier mapping, built once per alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierTable {
    alphabet: Alphabet,
    codes: Vec<BitField>,
    by_code: HashMap<BitField, usize>,
    short_len: u32,
    long_len: u32,
}

impl IdentifierTable {
    /// Assign identifiers to every symbol of `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        let n = alphabet.len() as u64;
        let e = n.ilog2();
        let r = n - (1 << e);
        let k = 2 * r;

        let mut codes = Vec::with_capacity(alphabet.len());
        codes.extend((0..n - k).map(|i| BitField::new(e, r + i)));
        codes.extend((0..k).map(|i| BitField::new(e + 1, i)));

        let by_code = codes.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self {
            alphabet,
            codes,
            by_code,
            short_len: e,
            long_len: if k > 0 { e + 1 } else { e },
        }
    }

    /// The alphabet the table was built over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of entries (the alphabet size).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Identifier for `symbol`.
    pub fn get(&self, symbol: char) -> Option<BitField> {
        self.alphabet.index_of(symbol).map(|i| self.codes[i])
    }

    /// Identifier for the symbol at alphabet position `index`.
    pub fn code(&self, index: usize) -> Option<BitField> {
        self.codes.get(index).copied()
    }

    /// Alphabet position whose identifier is exactly `field`.
    pub fn index_for(&self, field: BitField) -> Option<usize> {
        self.by_code.get(&field).copied()
    }

    /// Symbol whose identifier is exactly `field` (length and value).
    pub fn symbol_for(&self, field: BitField) -> Option<char> {
        self.index_for(field).and_then(|i| self.alphabet.get(i))
    }

    /// Length of the shorter identifiers.
    pub fn short_len(&self) -> u32 {
        self.short_len
    }

    /// Length of the longer identifiers (equal to `short_len` when the
    /// alphabet size is a power of two).
    pub fn long_len(&self) -> u32 {
        self.long_len
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::new(Alphabet::url())
    }
}
