//! Digest function trait definition

use crate::model::{Digest, DIGEST_LEN};

/// A deterministic, fixed-output-length one-way function
///
/// Implementations can use:
/// - The toy rolling checksum used by the teaching demos
/// - A real cryptographic hash (BLAKE3)
///
/// The tree and proof code only rely on determinism and the fixed length.
pub trait DigestFn: Send + Sync {
    /// Digest arbitrary bytes
    fn digest(&self, data: &[u8]) -> Digest;

    /// Digest of an internal node from its children's digests
    /// Default implementation digests `left ‖ right`
    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut buf = [0u8; DIGEST_LEN * 2];
        buf[..DIGEST_LEN].copy_from_slice(left.as_bytes());
        buf[DIGEST_LEN..].copy_from_slice(right.as_bytes());
        self.digest(&buf)
    }

    /// Get the function's name/identifier
    fn name(&self) -> &str;
}

impl<T: DigestFn + ?Sized> DigestFn for Box<T> {
    fn digest(&self, data: &[u8]) -> Digest {
        (**self).digest(data)
    }

    fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        (**self).combine(left, right)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
