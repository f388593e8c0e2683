use vitter::alphabet::URL_SAFE;
use vitter::Codec;

fn main() {
    let symbols: Vec<char> = URL_SAFE.chars().collect();
    // Deterministic input where low alphabet indices dominate.
    let input: String = (0..10000usize)
        .map(|i| symbols[(i * 7919 % 9973) % (1 + i % symbols.len())])
        .collect();

    let codec = Codec::url();
    for _ in 0..200 {
        let text = codec.encode(&input).unwrap();
        let decoded = codec.decode(&text).unwrap();
        assert_eq!(decoded.len(), input.len());
    }
}
