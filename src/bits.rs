//! Short bit strings.
//!
//! A [`BitField`] is an immutable `(len, value)` pair holding at most one
//! machine word of bits. The low `len` bits of `value` are the string, read
//! most-significant first.

use std::fmt;

/// Maximum number of bits a [`BitField`] can hold.
pub const MAX_BITS: u32 = u64::BITS;

/// An immutable bit string of up to [`MAX_BITS`] bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitField {
    len: u32,
    value: u64,
}

impl BitField {
    /// The zero-length bit string.
    pub const EMPTY: BitField = BitField { len: 0, value: 0 };

    /// Create a bit string from its length and value.
    ///
    /// # Panics
    /// If `len > MAX_BITS` or `value` has bits set above `len`.
    pub fn new(len: u32, value: u64) -> Self {
        assert!(len <= MAX_BITS, "bit field of {len} bits exceeds {MAX_BITS}");
        assert!(
            len == MAX_BITS || value >> len == 0,
            "value {value:#x} does not fit in {len} bits"
        );
        Self { len, value }
    }

    /// Number of bits.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// True for the zero-length string.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bits as an integer (first bit is the most significant).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Append `other` after `self`.
    ///
    /// # Panics
    /// If the combined length exceeds [`MAX_BITS`].
    pub fn concat(self, other: BitField) -> BitField {
        let len = self.len + other.len;
        assert!(len <= MAX_BITS, "concatenation of {len} bits exceeds {MAX_BITS}");
        let high = self.value.checked_shl(other.len).unwrap_or(0);
        BitField {
            len,
            value: high | other.value,
        }
    }

    /// Append a single bit.
    pub fn push(self, bit: bool) -> BitField {
        self.concat(BitField::new(1, bit as u64))
    }

    /// Iterate the bits, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| (self.value >> i) & 1 == 1)
    }

    /// True if the first `prefix.len()` bits of `self` equal `prefix`.
    pub fn starts_with(&self, prefix: BitField) -> bool {
        prefix.len <= self.len
            && self.value.checked_shr(self.len - prefix.len).unwrap_or(0) == prefix.value
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0b")?;
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
