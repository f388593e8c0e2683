use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use vitter::alphabet::URL_SAFE;
use vitter::{AdaptiveTree, Alphabet, BitField, Codec, IdentifierTable, Transport};

fn url_symbols() -> Vec<char> {
    URL_SAFE.chars().collect()
}

/// Streams over the URL alphabet, skewed towards low indices so that
/// repeats (and therefore promotions) are common.
fn skewed_stream(max_len: usize) -> impl Strategy<Value = String> {
    let symbols = url_symbols();
    prop::collection::vec((0..symbols.len(), 0..symbols.len()), 0..max_len)
        .prop_map(move |picks| picks.into_iter().map(|(a, b)| symbols[a.min(b)]).collect())
}

proptest! {
    #[test]
    fn test_codec_roundtrip(input in skewed_stream(300)) {
        let codec = Codec::url();
        let mut encoder = codec.encoder();
        encoder.push_str(&input).unwrap();
        let text = encoder.text();

        let mut decoder = codec.decoder();
        prop_assert_eq!(decoder.decode(&text).unwrap(), input.clone());
        prop_assert_eq!(decoder.tree(), encoder.tree());
        prop_assert_eq!(encoder.tree().weight(), input.chars().count() as u64);
    }

    #[test]
    fn test_invariants_after_every_update(input in skewed_stream(200)) {
        let mut tree = AdaptiveTree::new(Arc::new(IdentifierTable::default()));
        for (i, ch) in input.chars().enumerate() {
            tree.encode(ch).unwrap();
            prop_assert_eq!(tree.check_invariants(), Ok(()));
            prop_assert_eq!(tree.weight(), i as u64 + 1);

            let distinct = input.chars().take(i + 1).collect::<HashSet<_>>().len();
            prop_assert_eq!(tree.leaf_count(), distinct + 1);
        }
    }

    #[test]
    fn test_heavier_symbols_never_get_longer_codes(input in skewed_stream(300)) {
        let mut tree = AdaptiveTree::new(Arc::new(IdentifierTable::default()));
        for ch in input.chars() {
            tree.encode(ch).unwrap();
        }
        let seen: Vec<char> = url_symbols().into_iter().filter(|&c| tree.seen(c)).collect();
        for &a in &seen {
            for &b in &seen {
                if tree.count(a) > tree.count(b) {
                    prop_assert!(tree.code_of(a).unwrap().len() <= tree.code_of(b).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn test_transport_roundtrip(bits in prop::collection::vec(any::<bool>(), 0..400)) {
        let transport = Transport::url();
        let text = transport.encode(&bits);
        prop_assert_eq!(text.chars().count(), Transport::encoded_len(bits.len()));
        prop_assert_eq!(transport.decode(&text).unwrap(), bits);
    }

    #[test]
    fn test_identifiers_are_distinct_and_prefix_free(n in 2usize..300) {
        let cjk = (0..n as u32).map(|i| char::from_u32(0x4e00 + i).unwrap());
        let alphabet = Alphabet::new(cjk).unwrap();
        let table = IdentifierTable::new(alphabet);
        let codes: Vec<BitField> = (0..n).map(|i| table.code(i).unwrap()).collect();

        for (i, a) in codes.iter().enumerate() {
            prop_assert!(a.len() == table.short_len() || a.len() == table.long_len());
            prop_assert_eq!(table.index_for(*a), Some(i));
            for b in &codes[i + 1..] {
                prop_assert_ne!(a, b);
                prop_assert!(!a.starts_with(*b) && !b.starts_with(*a));
            }
        }
    }

    #[test]
    fn test_small_alphabet_roundtrip(input in prop::collection::vec(0usize..3, 0..200)) {
        // Three symbols: too few for a transport, so drive the trees on raw bits.
        let table = Arc::new(IdentifierTable::new(Alphabet::new("xyz".chars()).unwrap()));
        let symbols: Vec<char> = input.iter().map(|&i| ['x', 'y', 'z'][i]).collect();

        let mut encoder = AdaptiveTree::new(Arc::clone(&table));
        let mut bits = Vec::new();
        for &ch in &symbols {
            bits.extend(encoder.encode(ch).unwrap().bits());
        }
        let mut decoder = AdaptiveTree::new(table);
        prop_assert_eq!(decoder.decode_bits(&bits).unwrap(), symbols);
        prop_assert_eq!(decoder, encoder);
    }

    #[test]
    fn test_garbage_text_never_panics(text in "[a-zA-Z0-9_-]{0,40}") {
        let codec = Codec::url();
        let mut decoder = codec.decoder();
        let before = decoder.tree().clone();
        match decoder.decode(&text) {
            Ok(out) => {
                prop_assert_eq!(decoder.tree().weight(), out.chars().count() as u64);
            }
            Err(_) => {
                prop_assert_eq!(decoder.tree(), &before);
            }
        }
        prop_assert_eq!(decoder.tree().check_invariants(), Ok(()));
    }
}
