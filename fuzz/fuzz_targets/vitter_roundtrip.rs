#![no_main]
use libfuzzer_sys::fuzz_target;
use vitter::alphabet::URL_SAFE;
use vitter::Codec;

fuzz_target!(|data: (Vec<u8>, String)| {
    let (picks, text) = data;
    let codec = Codec::url();

    // Arbitrary text must decode or fail cleanly.
    let mut decoder = codec.decoder();
    if decoder.decode(&text).is_ok() {
        decoder.tree().check_invariants().unwrap();
    }

    let symbols: Vec<char> = URL_SAFE.chars().collect();
    let input: String = picks
        .iter()
        .map(|&b| symbols[b as usize % symbols.len()])
        .collect();

    let mut encoder = codec.encoder();
    encoder.push_str(&input).unwrap();
    encoder.tree().check_invariants().unwrap();

    let mut decoder = codec.decoder();
    assert_eq!(decoder.decode(&encoder.text()).unwrap(), input);
    assert_eq!(decoder.tree(), encoder.tree());
});
