//! # Adaptive Huffman Coding (Vitter)
//!
//! *One-pass prefix coding with no frequency table on the wire.*
//!
//! ## Intuition First
//!
//! Static Huffman coding reads the whole message, counts symbols, builds a
//! tree, and then has to ship that tree (or the counts) to the receiver
//! before any data. Adaptive Huffman coding skips the first pass: sender
//! and receiver both start from the same empty tree and both update it
//! after every symbol. Since the receiver sees exactly the symbols the
//! sender coded, the two trees never disagree, and the "table" travels
//! for free inside the data itself.
//!
//! ## The Problem
//!
//! Rebuilding a Huffman tree from scratch after every symbol costs
//! $O(n \log n)$ per symbol. The adaptive algorithms instead *repair* the
//! tree: incrementing one leaf's count can only break optimality along
//! that leaf's path to the root, and each break can be fixed by a bounded
//! exchange of subtrees.
//!
//! ## Historical Context
//!
//! ```text
//! 1952  Huffman     Minimum-redundancy prefix codes
//! 1973  Faller      First adaptive Huffman scheme
//! 1978  Gallager    Sibling property characterises Huffman trees
//! 1985  Knuth       Algorithm FGK: dynamic Huffman coding
//! 1987  Vitter      Algorithm Λ: minimises tree height and worst case
//! ```
//!
//! ## Mathematical Formulation
//!
//! A binary prefix-code tree with non-negative weights is a Huffman tree
//! iff it has the **sibling property**: its nodes can be listed in order of
//! non-decreasing weight such that siblings are adjacent and every parent
//! comes after its children. Vitter's variant fixes the order to the
//! implicit numbering (levels bottom-up, left to right) and additionally
//! keeps leaves ahead of internal nodes of the same weight, which bounds
//! the code length of every message to at most one bit per symbol more
//! than static Huffman.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(d)$ node moves per symbol, $d$ the code length. Block
//!   lookup here walks the tree, so a full update is $O(N)$ for an
//!   alphabet of $N$ symbols; fine for the small alphabets this crate is
//!   built for.
//! - **Space**: $O(N)$; at most $2N + 1$ nodes.
//!
//! ## Failure Modes
//!
//! 1. **Peer mismatch**: encoder and decoder must use the same alphabet in
//!    the same order. Nothing in the stream checks this; a mismatch decodes
//!    to wrong symbols without error.
//! 2. **Lost text**: decoding has to see every transport text of a stream
//!    in order, because each one advances the tree.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`AdaptiveTree`]: the tree and its update, encode and decode.
//! - [`IdentifierTable`]: phase-in codes naming a symbol on first sight.
//! - [`Transport`]: bits ↔ printable text, six bits per character.
//! - [`Codec`], [`Encoder`], [`Decoder`]: stream-level convenience.
//!
//! ```
//! use vitter::Codec;
//!
//! let codec = Codec::url();
//! let text = codec.encode("AA#BBB#C")?;
//! assert_eq!(text, "VJrH-7g");
//! assert_eq!(codec.decode(&text)?, "AA#BBB#C");
//! # Ok::<(), vitter::Error>(())
//! ```
//!
//! ## References
//!
//! - Gallager, R. G. (1978). "Variations on a theme by Huffman."
//! - Knuth, D. E. (1985). "Dynamic Huffman coding."
//! - Vitter, J. S. (1987). "Design and analysis of dynamic Huffman codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod bits;
pub mod codec;
pub mod error;
pub mod identifier;
pub mod transport;
pub mod tree;

pub use alphabet::Alphabet;
pub use bits::BitField;
pub use codec::{Codec, Decoder, Encoder};
pub use error::{Error, Result};
pub use identifier::IdentifierTable;
pub use transport::Transport;
pub use tree::{AdaptiveTree, Violation};
