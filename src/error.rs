//! Error types for adaptive Huffman coding.

use thiserror::Error;

/// Error variants for alphabet construction, encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The same symbol appears twice in an alphabet.
    #[error("duplicate symbol in alphabet: {0:?}")]
    DuplicateSymbol(char),

    /// The alphabet has fewer symbols than the operation needs.
    #[error("alphabet has {len} symbols, need at least {min}")]
    AlphabetTooSmall {
        /// Number of symbols supplied.
        len: usize,
        /// Minimum number required.
        min: usize,
    },

    /// A symbol outside the configured alphabet was handed to the encoder.
    #[error("symbol {0:?} is not in the alphabet")]
    UnknownSymbol(char),

    /// Transport text contains a character outside the 64-symbol alphabet.
    #[error("invalid transport character {ch:?} at position {position}")]
    InvalidTransportChar {
        /// The offending character.
        ch: char,
        /// Character offset within the text.
        position: usize,
    },

    /// Transport text carries no end-marker bit.
    #[error("transport text has no end marker")]
    MissingEndMarker,

    /// The bit stream stopped inside a path code or an identifier.
    #[error("bit stream ends mid-symbol after {consumed} bits")]
    TruncatedStream {
        /// Bits consumed before the stream ran out.
        consumed: usize,
    },
}

/// A specialized Result type for adaptive Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
