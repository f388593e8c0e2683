//! Printable text transport for bit streams.
//!
//! Bits are packed six to a character, most significant first, over a
//! 64-symbol alphabet. Before packing a single `1` bit is appended as an
//! end marker and the stream is zero-padded to a multiple of six; decoding
//! strips the padding and the marker, so any bit sequence (including the
//! empty one) survives the round trip exactly.

use std::collections::HashMap;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

/// Bits carried by one transport character.
pub const CHUNK_BITS: usize = 6;

/// Number of transport characters.
pub const TRANSPORT_SYMBOLS: usize = 1 << CHUNK_BITS;

/// A 64-character bit transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transport {
    symbols: Vec<char>,
    index: HashMap<char, u8>,
}

impl Transport {
    /// Use the first 64 symbols of `alphabet` as the transport characters.
    ///
    /// # Errors
    /// `Error::AlphabetTooSmall` if the alphabet has fewer than 64 symbols.
    pub fn new(alphabet: &Alphabet) -> Result<Self> {
        if alphabet.len() < TRANSPORT_SYMBOLS {
            return Err(Error::AlphabetTooSmall {
                len: alphabet.len(),
                min: TRANSPORT_SYMBOLS,
            });
        }
        Ok(Self::from_prefix(alphabet))
    }

    /// Transport over the first 64 characters of the URL-safe alphabet.
    pub fn url() -> Self {
        Self::from_prefix(&Alphabet::url())
    }

    fn from_prefix(alphabet: &Alphabet) -> Self {
        let symbols = alphabet.symbols()[..TRANSPORT_SYMBOLS].to_vec();
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, &ch)| (ch, i as u8))
            .collect();
        Self { symbols, index }
    }

    /// The 64 transport characters in chunk-value order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of characters `encode` produces for `bit_len` bits.
    pub fn encoded_len(bit_len: usize) -> usize {
        (bit_len + 1).div_ceil(CHUNK_BITS)
    }

    /// Render `bits` as text.
    pub fn encode(&self, bits: &[bool]) -> String {
        let mut out = String::with_capacity(Self::encoded_len(bits.len()));
        let marked = bits
            .iter()
            .copied()
            .chain(std::iter::once(true))
            .collect::<Vec<_>>();

        for chunk in marked.chunks(CHUNK_BITS) {
            let mut num = 0usize;
            for j in 0..CHUNK_BITS {
                num <<= 1;
                num |= chunk.get(j).copied().unwrap_or(false) as usize;
            }
            out.push(self.symbols[num]);
        }
        out
    }

    /// Recover the bits from `text`.
    ///
    /// # Errors
    /// - `Error::InvalidTransportChar` if any character is outside the
    ///   transport alphabet; nothing is decoded in that case.
    /// - `Error::MissingEndMarker` if the text holds no `1` bit.
    pub fn decode(&self, text: &str) -> Result<Vec<bool>> {
        let chunks = text
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                self.index.get(&ch).copied().ok_or_else(|| {
                    debug!(?ch, position, "rejecting transport text");
                    Error::InvalidTransportChar { ch, position }
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        let mut bits = Vec::with_capacity(chunks.len() * CHUNK_BITS);
        for num in chunks {
            for i in (0..CHUNK_BITS).rev() {
                bits.push(num & (1 << i) != 0);
            }
        }

        let Some(marker) = bits.iter().rposition(|&b| b) else {
            return Err(Error::MissingEndMarker);
        };
        bits.truncate(marker);
        Ok(bits)
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::url()
    }
}
