//! BLAKE3 digest function

use super::DigestFn;
use crate::model::Digest;

/// Real cryptographic digest backed by BLAKE3
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3;

impl Blake3 {
    pub fn new() -> Self {
        Blake3
    }
}

impl DigestFn for Blake3 {
    fn digest(&self, data: &[u8]) -> Digest {
        Digest::from_bytes(*blake3::hash(data).as_bytes())
    }

    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Digest::from_bytes(*hasher.finalize().as_bytes())
    }

    fn name(&self) -> &str {
        "blake3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_matches_crate() {
        let d = Blake3.digest(b"hello");
        assert_eq!(d.as_bytes(), blake3::hash(b"hello").as_bytes());
    }

    #[test]
    fn test_combine_matches_concatenation() {
        let b = Blake3::new();
        let l = b.digest(b"left");
        let r = b.digest(b"right");

        let mut concat = l.as_bytes().to_vec();
        concat.extend_from_slice(r.as_bytes());
        assert_eq!(b.combine(&l, &r), b.digest(&concat));
    }
}
