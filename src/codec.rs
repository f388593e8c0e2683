//! Stream-level encoding and decoding.
//!
//! A [`Codec`] holds what both peers must agree on: the alphabet (through
//! its identifier table) and the 64-character transport. Each stream
//! direction gets its own [`Encoder`] or [`Decoder`], which owns the
//! adaptive tree for that direction.

use std::sync::Arc;

use tracing::trace;

use crate::alphabet::Alphabet;
use crate::bits::BitField;
use crate::error::Result;
use crate::identifier::IdentifierTable;
use crate::transport::Transport;
use crate::tree::AdaptiveTree;

/// Shared configuration for encoders and decoders.
#[derive(Clone, Debug)]
pub struct Codec {
    table: Arc<IdentifierTable>,
    transport: Transport,
}

impl Codec {
    /// Build a codec over `alphabet`. Its first 64 symbols double as the
    /// transport alphabet.
    ///
    /// # Errors
    /// `Error::AlphabetTooSmall` if the alphabet has fewer than 64 symbols.
    pub fn new(alphabet: Alphabet) -> Result<Self> {
        let transport = Transport::new(&alphabet)?;
        Ok(Self {
            table: Arc::new(IdentifierTable::new(alphabet)),
            transport,
        })
    }

    /// Codec over the URL-safe alphabet.
    pub fn url() -> Self {
        Self {
            table: Arc::new(IdentifierTable::default()),
            transport: Transport::url(),
        }
    }

    /// The shared identifier table.
    pub fn table(&self) -> &Arc<IdentifierTable> {
        &self.table
    }

    /// The text transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Start a new outgoing stream.
    pub fn encoder(&self) -> Encoder {
        Encoder {
            tree: AdaptiveTree::new(Arc::clone(&self.table)),
            transport: self.transport.clone(),
            bits: Vec::new(),
        }
    }

    /// Start a new incoming stream.
    pub fn decoder(&self) -> Decoder {
        Decoder {
            tree: AdaptiveTree::new(Arc::clone(&self.table)),
            transport: self.transport.clone(),
        }
    }

    /// Encode `input` as a fresh stream.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` for characters outside the alphabet.
    pub fn encode(&self, input: &str) -> Result<String> {
        let mut encoder = self.encoder();
        encoder.push_str(input)?;
        Ok(encoder.finish())
    }

    /// Decode `text` as a fresh stream.
    ///
    /// # Errors
    /// See [`Decoder::decode`].
    pub fn decode(&self, text: &str) -> Result<String> {
        self.decoder().decode(text)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::url()
    }
}

/// Sending side of a stream.
#[derive(Clone, Debug)]
pub struct Encoder {
    tree: AdaptiveTree,
    transport: Transport,
    bits: Vec<bool>,
}

impl Encoder {
    /// Code one symbol and append its bits to the stream.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` if `symbol` is outside the alphabet.
    pub fn push(&mut self, symbol: char) -> Result<BitField> {
        let code = self.tree.encode(symbol)?;
        trace!(?symbol, %code, "encoded");
        self.bits.extend(code.bits());
        Ok(code)
    }

    /// Code every character of `input`.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` at the first character outside the alphabet;
    /// the characters before it stay coded.
    pub fn push_str(&mut self, input: &str) -> Result<()> {
        for symbol in input.chars() {
            self.push(symbol)?;
        }
        Ok(())
    }

    /// Bits produced so far.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of bits produced so far.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// The encoder's tree.
    pub fn tree(&self) -> &AdaptiveTree {
        &self.tree
    }

    /// Transport text for everything coded so far.
    pub fn text(&self) -> String {
        self.transport.encode(&self.bits)
    }

    /// Finish the stream and return its transport text.
    pub fn finish(self) -> String {
        self.text()
    }
}

/// Receiving side of a stream.
#[derive(Clone, Debug)]
pub struct Decoder {
    tree: AdaptiveTree,
    transport: Transport,
}

impl Decoder {
    /// Decode one transport text, continuing from the tree state left by
    /// earlier calls.
    ///
    /// # Errors
    /// - `Error::InvalidTransportChar` / `Error::MissingEndMarker` for
    ///   malformed text.
    /// - `Error::TruncatedStream` if the text stops mid-symbol.
    ///
    /// The tree is untouched when an error is returned.
    pub fn decode(&mut self, text: &str) -> Result<String> {
        let symbols = self.tree.decode(text, &self.transport)?;
        Ok(symbols.into_iter().collect())
    }

    /// The decoder's tree.
    pub fn tree(&self) -> &AdaptiveTree {
        &self.tree
    }

    /// Take the tree out of the decoder.
    pub fn into_tree(self) -> AdaptiveTree {
        self.tree
    }
}
