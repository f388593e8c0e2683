//! The adaptive code tree.
//!
//! Encoder and decoder each own an [`AdaptiveTree`] and apply the same
//! [update](AdaptiveTree::encode) after every symbol, so both trees stay
//! identical without any frequency table on the wire.
//!
//! # Algorithm
//!
//! The tree starts as a single placeholder leaf ("not yet transmitted",
//! NYT) of weight zero. Coding a symbol emits its root-to-leaf path
//! (`0` = left, `1` = right). A symbol seen for the first time emits the
//! placeholder's path followed by the symbol's identifier, and the
//! placeholder then splits into an internal node holding the placeholder
//! on the left and a new leaf on the right.
//!
//! After each occurrence the tree is rebalanced with Vitter's algorithm Λ:
//! the leaf is swapped to the front of its block (same weight, same
//! leaf/internal kind), then every node on the way to the root is slid
//! past the block it is about to overtake and incremented. This keeps the
//! sibling property:
//!
//! ```text
//! levels read bottom-up, left to right  =>  weights non-decreasing
//! ```
//!
//! which is exactly the condition for the tree to be a Huffman tree for the
//! counts seen so far.
//!
//! # Representation
//!
//! Nodes live in an arena and refer to each other by index. Nodes are never
//! freed, so a tree over `N` symbols never holds more than `2N + 1` nodes.

use std::fmt;
use std::iter;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::bits::{BitField, MAX_BITS};
use crate::error::{Error, Result};
use crate::identifier::IdentifierTable;
use crate::transport::Transport;

type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    weight: u64,
    /// Alphabet index of a symbol leaf. `None` for internal nodes and the
    /// placeholder.
    symbol: Option<usize>,
    parent: Option<NodeId>,
    /// `(left, right)`; absent on leaves.
    children: Option<(NodeId, NodeId)>,
}

impl Node {
    fn leaf(symbol: Option<usize>, parent: Option<NodeId>) -> Self {
        Self {
            weight: 0,
            symbol,
            parent,
            children: None,
        }
    }
}

/// A broken structural invariant, reported by
/// [`AdaptiveTree::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A child does not point back at the node that holds it.
    #[error("node {child} does not point back to parent {parent}")]
    BrokenLink {
        /// Holding node.
        parent: usize,
        /// Child with the wrong back-reference.
        child: usize,
    },

    /// An internal node's weight differs from the sum of its children.
    #[error("node {node} has weight {actual}, children sum to {expected}")]
    WeightMismatch {
        /// Offending node.
        node: usize,
        /// Sum of the children's weights.
        expected: u64,
        /// Stored weight.
        actual: u64,
    },

    /// Weights decrease somewhere in the bottom-up, left-to-right order.
    #[error("sibling property fails at node {node}: weight {weight} follows {previous}")]
    SiblingOrder {
        /// First node out of order.
        node: usize,
        /// Its weight.
        weight: u64,
        /// Weight of the node before it.
        previous: u64,
    },

    /// Not exactly one unassigned leaf, or it is not the tracked placeholder.
    #[error("expected one placeholder leaf of weight 0, found {0}")]
    Placeholder(usize),

    /// The symbol → leaf table disagrees with the tree.
    #[error("leaf table entry for symbol index {0} is stale")]
    StaleLeaf(usize),

    /// Some arena nodes are not reachable from the root.
    #[error("{reachable} of {total} nodes reachable from the root")]
    Unreachable {
        /// Nodes found by walking from the root.
        reachable: usize,
        /// Nodes in the arena.
        total: usize,
    },
}

/// One side's copy of the adaptive prefix-code tree.
#[derive(Clone, Debug)]
pub struct AdaptiveTree {
    table: Arc<IdentifierTable>,
    nodes: Vec<Node>,
    root: NodeId,
    placeholder: NodeId,
    /// Current leaf of every seen symbol, by alphabet index.
    leaves: Vec<Option<NodeId>>,
}

impl AdaptiveTree {
    /// Create a tree holding only the placeholder leaf.
    pub fn new(table: Arc<IdentifierTable>) -> Self {
        let leaves = vec![None; table.len()];
        Self {
            table,
            nodes: vec![Node::leaf(None, None)],
            root: 0,
            placeholder: 0,
            leaves,
        }
    }

    /// The identifier table shared with the peer.
    pub fn table(&self) -> &Arc<IdentifierTable> {
        &self.table
    }

    /// Number of symbols coded so far (the root weight).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, the placeholder included.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_none()).count()
    }

    /// Whether `symbol` has been coded at least once.
    pub fn seen(&self, symbol: char) -> bool {
        self.leaf_of(symbol).is_some()
    }

    /// Occurrences of `symbol` so far.
    pub fn count(&self, symbol: char) -> u64 {
        self.leaf_of(symbol).map_or(0, |leaf| self.nodes[leaf].weight)
    }

    /// Current code of a seen symbol.
    pub fn code_of(&self, symbol: char) -> Option<BitField> {
        self.leaf_of(symbol).map(|leaf| self.path_code(leaf))
    }

    /// Current code of the placeholder.
    pub fn placeholder_code(&self) -> BitField {
        self.path_code(self.placeholder)
    }

    /// Code `symbol` and update the tree.
    ///
    /// A first occurrence yields the placeholder's path followed by the
    /// symbol's identifier; later occurrences yield the symbol's path.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` if `symbol` is not in the alphabet. The tree
    /// is unchanged in that case.
    pub fn encode(&mut self, symbol: char) -> Result<BitField> {
        let (index, identifier) = self
            .table
            .alphabet()
            .index_of(symbol)
            .and_then(|index| Some((index, self.table.code(index)?)))
            .ok_or(Error::UnknownSymbol(symbol))?;

        let code = match self.leaves[index] {
            Some(leaf) => self.path_code(leaf),
            None => self.path_code(self.placeholder).concat(identifier),
        };
        self.occur(index);
        Ok(code)
    }

    /// Decode transport text produced by the peer's encoder.
    ///
    /// # Errors
    /// See [`Transport::decode`] and [`AdaptiveTree::decode_bits`].
    pub fn decode(&mut self, text: &str, transport: &Transport) -> Result<Vec<char>> {
        let bits = transport.decode(text)?;
        self.decode_bits(&bits)
    }

    /// Decode a bit stream, updating the tree after every symbol exactly as
    /// the encoder did.
    ///
    /// # Errors
    /// `Error::TruncatedStream` if the bits stop inside a path or an
    /// identifier. On error the tree is left as it was before the call.
    pub fn decode_bits(&mut self, bits: &[bool]) -> Result<Vec<char>> {
        let mut scratch = self.clone();
        let symbols = scratch.decode_in_place(bits)?;
        *self = scratch;
        Ok(symbols)
    }

    fn decode_in_place(&mut self, bits: &[bool]) -> Result<Vec<char>> {
        let mut out = Vec::new();
        let mut cursor = self.root;
        let mut identifier: Option<BitField> = None;

        for &bit in bits {
            if cursor == self.placeholder && identifier.is_none() {
                identifier = Some(BitField::EMPTY);
            }

            if let Some(field) = identifier {
                let field = field.push(bit);
                debug_assert!(field.len() <= self.table.long_len());
                match self.table.index_for(field) {
                    Some(index) => {
                        out.push(self.symbol_char(index));
                        if self.leaves[index].is_some() {
                            let symbol = self.symbol_char(index);
                            debug!(%symbol, "identifier names a seen symbol");
                        }
                        self.occur(index);
                        cursor = self.root;
                        identifier = None;
                    }
                    None => identifier = Some(field),
                }
            } else {
                cursor = self.child(cursor, bit);
                // Landing on the placeholder starts an identifier at the next bit.
                if let Some(index) = self.nodes[cursor].symbol {
                    out.push(self.symbol_char(index));
                    self.update(cursor, None);
                    cursor = self.root;
                }
            }
        }

        if identifier.is_some() || cursor != self.root {
            debug!(consumed = bits.len(), "bit stream ends mid-symbol");
            return Err(Error::TruncatedStream {
                consumed: bits.len(),
            });
        }
        Ok(out)
    }

    /// Verify links, weights, the sibling property, the single placeholder
    /// and the symbol → leaf table.
    pub fn check_invariants(&self) -> std::result::Result<(), Violation> {
        let levels = self.levels();

        let reachable: usize = levels.iter().map(Vec::len).sum();
        if reachable != self.nodes.len() || self.nodes[self.root].parent.is_some() {
            return Err(Violation::Unreachable {
                reachable,
                total: self.nodes.len(),
            });
        }

        for (id, node) in self.nodes.iter().enumerate() {
            let Some((left, right)) = node.children else {
                continue;
            };
            for child in [left, right] {
                if self.nodes[child].parent != Some(id) {
                    return Err(Violation::BrokenLink { parent: id, child });
                }
            }
            let expected = self.nodes[left].weight + self.nodes[right].weight;
            if node.weight != expected {
                return Err(Violation::WeightMismatch {
                    node: id,
                    expected,
                    actual: node.weight,
                });
            }
        }

        let mut previous = 0;
        for &id in levels.iter().rev().flatten() {
            let weight = self.nodes[id].weight;
            if weight < previous {
                return Err(Violation::SiblingOrder {
                    node: id,
                    weight,
                    previous,
                });
            }
            previous = weight;
        }

        let unassigned = self
            .nodes
            .iter()
            .filter(|n| n.children.is_none() && n.symbol.is_none())
            .count();
        let nyt = &self.nodes[self.placeholder];
        let nyt_is_leaf = nyt.children.is_none() && nyt.symbol.is_none();
        if unassigned != 1 || !nyt_is_leaf || nyt.weight != 0 {
            return Err(Violation::Placeholder(unassigned));
        }

        for (index, leaf) in self.leaves.iter().enumerate() {
            if let Some(leaf) = *leaf {
                let node = &self.nodes[leaf];
                if node.symbol != Some(index) || node.children.is_some() {
                    return Err(Violation::StaleLeaf(index));
                }
            }
        }
        for (id, node) in self.nodes.iter().enumerate() {
            if let Some(index) = node.symbol {
                if self.leaves[index] != Some(id) {
                    return Err(Violation::StaleLeaf(index));
                }
            }
        }

        Ok(())
    }

    /// Count one occurrence of the symbol at alphabet position `index`:
    /// its leaf if it has one, otherwise a split of the placeholder.
    fn occur(&mut self, index: usize) {
        match self.leaves[index] {
            Some(leaf) => self.update(leaf, None),
            None => self.update(self.placeholder, Some(index)),
        }
    }

    /// Rebalance after an occurrence at `node`. `symbol` names the new
    /// symbol when `node` is the placeholder.
    fn update(&mut self, node: NodeId, symbol: Option<usize>) {
        let (start, leaf_to_increment) = if node == self.placeholder {
            let Some(symbol) = symbol else {
                unreachable!("placeholder update without a symbol");
            };
            let (internal, leaf) = self.split_placeholder(symbol);
            (internal, Some(leaf))
        } else {
            self.promote(node)
        };

        let mut q = start;
        while q != self.root {
            q = self.slide_and_increment(q);
        }
        self.nodes[self.root].weight += 1;

        if let Some(leaf) = leaf_to_increment {
            self.slide_and_increment(leaf);
        }
    }

    /// Replace the placeholder with an internal node whose left child is the
    /// placeholder and whose right child is a new leaf for `symbol`.
    fn split_placeholder(&mut self, symbol: usize) -> (NodeId, NodeId) {
        debug_assert!(self.leaves[symbol].is_none(), "symbol {symbol} already has a leaf");
        let nyt = self.placeholder;
        let former_parent = self.nodes[nyt].parent;
        let internal = self.nodes.len();
        let leaf = internal + 1;

        self.nodes.push(Node {
            weight: 0,
            symbol: None,
            parent: former_parent,
            children: Some((nyt, leaf)),
        });
        self.nodes.push(Node::leaf(Some(symbol), Some(internal)));
        self.nodes[nyt].parent = Some(internal);

        match former_parent {
            Some(parent) => self.bind(parent, Side::Left, internal),
            None => self.root = internal,
        }
        self.leaves[symbol] = Some(leaf);

        trace!(symbol = %self.symbol_char(symbol), nodes = self.nodes.len(), "new symbol");
        (internal, leaf)
    }

    /// Move `node` to the front of its block. Returns the node to start the
    /// climb from, and the leaf to increment after the climb when `node`
    /// ends up as the placeholder's sibling.
    fn promote(&mut self, node: NodeId) -> (NodeId, Option<NodeId>) {
        let is_leaf = self.is_leaf(node);
        let leader = self
            .find_block(self.nodes[node].weight)
            .into_iter()
            .rev()
            .find(|&n| self.is_leaf(n) == is_leaf);
        let Some(leader) = leader else {
            unreachable!("node {node} is missing from its own block");
        };
        self.swap(node, leader);

        let parent = self.parent(node);
        match self.nodes[parent].children {
            Some((left, _)) if left == self.placeholder => (parent, Some(node)),
            _ => (node, None),
        }
    }

    /// Slide `q` past the block it is about to join, then increment it.
    /// Returns the next node of the climb: the new parent for a leaf, the
    /// former parent for an internal node.
    fn slide_and_increment(&mut self, q: NodeId) -> NodeId {
        let is_leaf = self.is_leaf(q);
        let weight = self.nodes[q].weight;
        let target = if is_leaf { weight } else { weight + 1 };
        let block: Vec<NodeId> = self
            .find_block(target)
            .into_iter()
            .filter(|&n| self.is_leaf(n) != is_leaf)
            .collect();

        let former_parent = self.parent(q);
        self.slide(q, &block);
        self.nodes[q].weight += 1;

        if is_leaf {
            self.parent(q)
        } else {
            former_parent
        }
    }

    /// Shift every node of `block` one slot back and put `q` in the last
    /// block member's slot. Subtrees travel with their roots.
    fn slide(&mut self, q: NodeId, block: &[NodeId]) {
        if block.is_empty() {
            return;
        }
        let slots: Vec<(NodeId, Side)> = iter::once(q)
            .chain(block.iter().copied())
            .map(|n| self.slot(n))
            .collect();
        let movers = block.iter().copied().chain(iter::once(q));
        for ((parent, side), node) in slots.into_iter().zip(movers) {
            self.bind(parent, side, node);
        }
    }

    /// Exchange the positions of two nodes with their subtrees.
    fn swap(&mut self, node: NodeId, target: NodeId) {
        if node == target || self.nodes[node].parent == Some(target) {
            return;
        }
        let (node_parent, node_side) = self.slot(node);
        let (target_parent, target_side) = self.slot(target);
        self.bind(node_parent, node_side, target);
        self.bind(target_parent, target_side, node);
    }

    /// Non-root nodes of weight `weight`, deepest level first, left to
    /// right within a level. The last entry is the block leader.
    fn find_block(&self, weight: u64) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut level = vec![self.root];

        while !level.is_empty() {
            let mut next = Vec::with_capacity(level.len() * 2);
            for &id in &level {
                if let Some((left, right)) = self.nodes[id].children {
                    next.extend(
                        [left, right]
                            .into_iter()
                            .filter(|&c| self.nodes[c].weight >= weight),
                    );
                }
            }
            found.extend(next.iter().rev().filter(|&&c| self.nodes[c].weight == weight));
            level = next;
        }

        found.reverse();
        found
    }

    /// All nodes grouped by depth, each level left to right.
    fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut level = vec![self.root];
        while !level.is_empty() {
            let next = level
                .iter()
                .filter_map(|&id| self.nodes[id].children)
                .flat_map(|(left, right)| [left, right])
                .collect();
            levels.push(level);
            level = next;
        }
        levels
    }

    fn path_code(&self, node: NodeId) -> BitField {
        let mut len = 0u32;
        let mut value = 0u64;
        let mut cursor = node;
        while let Some(parent) = self.nodes[cursor].parent {
            assert!(len < MAX_BITS, "code path exceeds {MAX_BITS} bits");
            if self.side_of(cursor, parent) == Side::Right {
                value |= 1 << len;
            }
            len += 1;
            cursor = parent;
        }
        BitField::new(len, value)
    }

    fn bind(&mut self, parent: NodeId, side: Side, child: NodeId) {
        let Some((left, right)) = self.nodes[parent].children.as_mut() else {
            unreachable!("cannot bind a child under leaf {parent}");
        };
        match side {
            Side::Left => *left = child,
            Side::Right => *right = child,
        }
        self.nodes[child].parent = Some(parent);
    }

    fn slot(&self, node: NodeId) -> (NodeId, Side) {
        let parent = self.parent(node);
        (parent, self.side_of(node, parent))
    }

    fn side_of(&self, node: NodeId, parent: NodeId) -> Side {
        match self.nodes[parent].children {
            Some((_, right)) if right == node => Side::Right,
            _ => Side::Left,
        }
    }

    fn parent(&self, node: NodeId) -> NodeId {
        let Some(parent) = self.nodes[node].parent else {
            unreachable!("node {node} has no parent");
        };
        parent
    }

    fn child(&self, node: NodeId, bit: bool) -> NodeId {
        let Some((left, right)) = self.nodes[node].children else {
            unreachable!("walked past leaf {node}");
        };
        if bit {
            right
        } else {
            left
        }
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node].children.is_none()
    }

    fn leaf_of(&self, symbol: char) -> Option<NodeId> {
        let index = self.table.alphabet().index_of(symbol)?;
        self.leaves[index]
    }

    fn symbol_char(&self, index: usize) -> char {
        self.table.alphabet().symbols()[index]
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = &self.nodes[id];
        write!(f, "{:indent$}", "", indent = depth * 4)?;
        match (node.symbol, node.children) {
            (Some(index), _) => writeln!(f, "{} {}", self.symbol_char(index), node.weight)?,
            (None, None) => writeln!(f, "NYT {}", node.weight)?,
            (None, Some(_)) => writeln!(f, "- {}", node.weight)?,
        }
        if let Some((left, right)) = node.children {
            self.fmt_node(f, left, depth + 1)?;
            self.fmt_node(f, right, depth + 1)?;
        }
        Ok(())
    }
}

/// Structural equality: same shape, weights, symbols and node numbering.
impl PartialEq for AdaptiveTree {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.placeholder == other.placeholder
            && self.nodes == other.nodes
            && self.leaves == other.leaves
    }
}

impl Eq for AdaptiveTree {}

impl fmt::Display for AdaptiveTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_tree() -> AdaptiveTree {
        AdaptiveTree::new(Arc::new(IdentifierTable::default()))
    }

    fn encode_all(tree: &mut AdaptiveTree, input: &str) -> Vec<bool> {
        let mut bits = Vec::new();
        for ch in input.chars() {
            bits.extend(tree.encode(ch).unwrap().bits());
            tree.check_invariants().unwrap();
        }
        bits
    }

    #[test]
    fn test_fresh_tree() {
        let tree = url_tree();
        assert_eq!(tree.weight(), 0);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.placeholder_code(), BitField::EMPTY);
        assert!(!tree.seen('a'));
        tree.check_invariants().unwrap();
        assert_eq!(tree.to_string(), "NYT 0\n");
    }

    #[test]
    fn test_first_symbol_is_bare_identifier() {
        let mut tree = url_tree();
        assert_eq!(tree.encode('A').unwrap(), BitField::new(6, 47));
        assert_eq!(tree.weight(), 1);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.placeholder_code(), BitField::new(1, 0));
        assert_eq!(tree.code_of('A'), Some(BitField::new(1, 1)));
        assert_eq!(tree.to_string(), "- 1\n    NYT 0\n    A 1\n");
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_scenario_codes() {
        let mut tree = url_tree();
        let expected = [
            ('A', BitField::new(6, 47)),
            ('A', BitField::new(1, 1)),
            ('#', BitField::new(8, 26)),
            ('B', BitField::new(8, 48)),
            ('B', BitField::new(3, 7)),
            ('B', BitField::new(2, 3)),
            ('#', BitField::new(3, 5)),
            ('C', BitField::new(9, 433)),
        ];
        for (ch, code) in expected {
            assert_eq!(tree.encode(ch).unwrap(), code, "coding {ch:?}");
            tree.check_invariants().unwrap();
        }
        assert_eq!(tree.weight(), 8);
        assert_eq!(tree.count('B'), 3);
        assert_eq!(tree.count('z'), 0);
        assert_eq!(tree.placeholder_code(), BitField::new(3, 0));
        assert_eq!(tree.code_of('B'), Some(BitField::new(2, 3)));
        assert_eq!(
            tree.to_string(),
            "- 8\n    - 3\n        - 1\n            NYT 0\n            C 1\n        # 2\n    - 5\n        A 2\n        B 3\n"
        );
    }

    #[test]
    fn test_decoder_tracks_encoder() {
        let mut encoder = url_tree();
        let bits = encode_all(&mut encoder, "AA#BBB#C");

        let mut decoder = url_tree();
        let symbols: String = decoder.decode_bits(&bits).unwrap().into_iter().collect();
        assert_eq!(symbols, "AA#BBB#C");
        assert_eq!(decoder, encoder);
    }

    #[test]
    fn test_find_block_orders_deepest_first() {
        let mut tree = url_tree();
        encode_all(&mut tree, "AA#BBB#C");
        // Weight-1 nodes: the internal parent of NYT/C, then C beside it.
        let block = tree.find_block(1);
        assert_eq!(block.len(), 2);
        assert_eq!(tree.nodes[block[0]].symbol, tree.table.alphabet().index_of('C'));
        assert!(!tree.is_leaf(block[1]));
        assert!(tree.find_block(4).is_empty());
    }

    #[test]
    fn test_unknown_symbol_leaves_tree_alone() {
        let mut tree = url_tree();
        encode_all(&mut tree, "ab");
        let before = tree.clone();
        assert_eq!(tree.encode(' '), Err(Error::UnknownSymbol(' ')));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_truncated_stream_is_rejected_atomically() {
        let mut encoder = url_tree();
        let mut bits = encode_all(&mut encoder, "A");
        // Step onto the placeholder, then stop before any identifier bit.
        bits.push(false);

        let mut decoder = url_tree();
        assert_eq!(
            decoder.decode_bits(&bits),
            Err(Error::TruncatedStream { consumed: 7 })
        );
        assert_eq!(decoder, url_tree());

        // Half an identifier is just as incomplete.
        bits.extend([true, false, true]);
        assert!(decoder.decode_bits(&bits).is_err());
        assert_eq!(decoder.weight(), 0);
    }

    #[test]
    fn test_decoding_continues_across_calls() {
        let mut encoder = url_tree();
        let first = encode_all(&mut encoder, "hello");
        let second = encode_all(&mut encoder, "hollow");

        let mut decoder = url_tree();
        assert_eq!(decoder.decode_bits(&first).unwrap().len(), 5);
        let rest: String = decoder.decode_bits(&second).unwrap().into_iter().collect();
        assert_eq!(rest, "hollow");
        assert_eq!(decoder, encoder);
    }

    #[test]
    fn test_skewed_stream_keeps_invariants() {
        let mut tree = url_tree();
        let input: String = (0..400)
            .map(|i| match i % 7 {
                0..=3 => 'e',
                4 | 5 => 't',
                _ => char::from(b'a' + (i % 26) as u8),
            })
            .collect();
        encode_all(&mut tree, &input);
        assert_eq!(tree.weight(), 400);
        assert_eq!(tree.leaf_count(), 27);
        // The most frequent symbol never gets a longer code than a rarer one.
        let e = tree.code_of('e').unwrap().len();
        let z = tree.code_of('z').unwrap().len();
        assert!(e <= z);
    }

    #[test]
    fn test_identifier_for_seen_symbol_counts_as_occurrence() {
        // Placeholder path `0` followed by A's identifier again, where the
        // encoder would have sent A's path `1`.
        let mut bits: Vec<bool> = BitField::new(6, 47).bits().collect();
        bits.push(false);
        bits.extend(BitField::new(6, 47).bits());

        let mut decoder = url_tree();
        let out: String = decoder.decode_bits(&bits).unwrap().into_iter().collect();
        assert_eq!(out, "AA");
        decoder.check_invariants().unwrap();
        assert_eq!(decoder.leaf_count(), 2);
        assert_eq!(decoder.node_count(), 3);
        assert_eq!(decoder.count('A'), 2);
        assert_eq!(decoder.to_string(), "- 2\n    NYT 0\n    A 2\n");

        let mut encoder = url_tree();
        encode_all(&mut encoder, "AA");
        assert_eq!(decoder, encoder);
    }

    #[test]
    fn test_repeated_identifiers_never_grow_the_tree() {
        let mut encoder = url_tree();
        let mut bits = encode_all(&mut encoder, "ab");
        // Name 'a' and 'b' through the placeholder over and over.
        for _ in 0..20 {
            for ch in ['a', 'b'] {
                bits.extend(encoder.placeholder_code().bits());
                let id = encoder.table().get(ch).unwrap();
                bits.extend(id.bits());
                // Keep the reference tree in step with what the decoder does.
                let index = encoder.table().alphabet().index_of(ch).unwrap();
                encoder.occur(index);
            }
        }

        let mut decoder = url_tree();
        let out: String = decoder.decode_bits(&bits).unwrap().into_iter().collect();
        assert_eq!(out, "ab".repeat(21));
        decoder.check_invariants().unwrap();
        assert_eq!(decoder.leaf_count(), 3);
        assert_eq!(decoder.node_count(), 5);
        assert_eq!(decoder.count('a'), 21);
        assert_eq!(decoder, encoder);
    }

    #[test]
    fn test_small_alphabet() {
        let alphabet = crate::alphabet::Alphabet::new("01".chars()).unwrap();
        let table = Arc::new(IdentifierTable::new(alphabet));
        let mut encoder = AdaptiveTree::new(Arc::clone(&table));
        let mut bits = Vec::new();
        for ch in "0110100".chars() {
            bits.extend(encoder.encode(ch).unwrap().bits());
            encoder.check_invariants().unwrap();
        }
        let mut decoder = AdaptiveTree::new(table);
        let out: String = decoder.decode_bits(&bits).unwrap().into_iter().collect();
        assert_eq!(out, "0110100");
    }
}
