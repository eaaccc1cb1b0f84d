//! Toy rolling checksum dressed up as a 256-bit digest

use super::DigestFn;
use crate::model::{Digest, DIGEST_LEN};

/// Odd multiplier used to spread the checksum across the output words
const SPREAD: u32 = 0x9E37_79B1;

/// The non-cryptographic digest the teaching demos use
///
/// A 32-bit rolling checksum (`h = h * 31 + byte`, wrapping) is expanded
/// into 32 bytes so it looks like a real hash. Only 2^32 distinct outputs
/// exist, so collisions are easy to find. Use [`Blake3`](super::Blake3)
/// when that matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToyChecksum;

impl ToyChecksum {
    pub fn new() -> Self {
        ToyChecksum
    }

    /// The raw 32-bit rolling checksum
    pub fn checksum(data: &[u8]) -> u32 {
        data.iter()
            .fold(0u32, |h, &b| h.wrapping_mul(31).wrapping_add(b as u32))
    }

    /// Expand a checksum into a full digest.
    /// Every word, including the first, goes through a bijection on u32,
    /// so nearby checksums differ in the leading hex digits.
    fn expand(checksum: u32) -> Digest {
        let mut bytes = [0u8; DIGEST_LEN];
        let mut word = checksum;
        for (i, chunk) in bytes.chunks_exact_mut(4).enumerate() {
            word = word.wrapping_mul(SPREAD) ^ i as u32;
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest::from_bytes(bytes)
    }
}

impl DigestFn for ToyChecksum {
    fn digest(&self, data: &[u8]) -> Digest {
        Self::expand(Self::checksum(data))
    }

    fn name(&self) -> &str {
        "toy-checksum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_rolls() {
        assert_eq!(ToyChecksum::checksum(b""), 0);
        assert_eq!(ToyChecksum::checksum(b"A"), 65);
        assert_eq!(ToyChecksum::checksum(b"AB"), 65 * 31 + 66);
    }

    #[test]
    fn test_first_word_is_spread_checksum() {
        let d = ToyChecksum.digest(b"AB");
        let expected = (65u32 * 31 + 66).wrapping_mul(SPREAD);
        assert_eq!(&d.as_bytes()[..4], &expected.to_be_bytes());
    }

    #[test]
    fn test_short_labels_distinct_for_adjacent_records() {
        let toy = ToyChecksum;
        let a = toy.digest(b"A").short();
        let b = toy.digest(b"B").short();
        let c = toy.digest(b"C").short();
        assert_eq!(a, "2c15e5f");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_toy_deterministic() {
        let toy = ToyChecksum::new();
        assert_eq!(toy.digest(b"hello"), toy.digest(b"hello"));
        assert_ne!(toy.digest(b"hello"), toy.digest(b"world"));
    }

    #[test]
    fn test_toy_output_looks_hash_like() {
        let d = ToyChecksum.digest(b"A");
        assert_eq!(d.to_hex().len(), 64);
        // The expansion fills every word, not just the first
        assert!(d.as_bytes()[4..].iter().any(|&b| b != 0));
    }

    #[test]
    fn test_toy_combine_is_order_sensitive() {
        let toy = ToyChecksum;
        let a = toy.digest(b"A");
        let b = toy.digest(b"B");
        assert_ne!(toy.combine(&a, &b), toy.combine(&b, &a));
    }
}
