//! High-level Engine API
//!
//! Bundles a digest function with the tree, proof and verify operations so
//! callers don't have to thread the hasher through every call.

use crate::hasher::{DigestFn, HasherKind};
use crate::merkle::{self, MerkleTree, Proof};
use crate::model::{Digest, Record};
use std::sync::Arc;

/// The main engine interface
///
/// Cheap to clone; the digest function is shared.
#[derive(Clone)]
pub struct Engine {
    hasher: Arc<dyn DigestFn>,
}

impl Engine {
    /// Create an engine using one of the built-in digest functions
    pub fn new(kind: HasherKind) -> Self {
        Engine {
            hasher: Arc::from(kind.build()),
        }
    }

    /// Use a custom digest function
    pub fn with_hasher(hasher: impl DigestFn + 'static) -> Self {
        Engine {
            hasher: Arc::new(hasher),
        }
    }

    pub fn hasher(&self) -> &dyn DigestFn {
        &*self.hasher
    }

    pub fn hasher_name(&self) -> &str {
        self.hasher.name()
    }

    /// Digest arbitrary bytes
    pub fn digest(&self, data: &[u8]) -> Digest {
        self.hasher.digest(data)
    }

    /// Digest of the leaf that `record` would become
    pub fn leaf_digest(&self, record: &Record) -> Digest {
        self.hasher.digest(record.as_bytes())
    }

    /// Build a tree; empty input gives the empty tree
    pub fn build(&self, records: &[Record]) -> MerkleTree {
        MerkleTree::build(self.hasher(), records)
    }

    /// Inclusion proof for `records[index]`; empty if out of range
    pub fn prove(&self, records: &[Record], index: usize) -> Proof {
        merkle::prove(self.hasher(), records, index)
    }

    /// Check a proof against a root
    pub fn verify(&self, leaf: &Digest, proof: &Proof, root: &Digest) -> bool {
        merkle::verify(self.hasher(), leaf, proof, root)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(HasherKind::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::ToyChecksum;
    use crate::model::records_from;

    /// Digest that ignores its input, to check custom hashers are used
    struct Constant;

    impl DigestFn for Constant {
        fn digest(&self, _data: &[u8]) -> Digest {
            Digest::from_bytes([7u8; 32])
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_default_engine_is_toy() {
        let engine = Engine::default();
        assert_eq!(engine.hasher_name(), "toy-checksum");
        assert_eq!(engine.digest(b"A"), ToyChecksum.digest(b"A"));
    }

    #[test]
    fn test_engine_roundtrip_every_index() {
        let engine = Engine::new(HasherKind::Blake3);
        let records = records_from(["a", "b", "c", "d", "e", "f", "g"]);
        let root = engine.build(&records).root_digest();

        for (i, record) in records.iter().enumerate() {
            let proof = engine.prove(&records, i);
            assert!(engine.verify(&engine.leaf_digest(record), &proof, &root));
        }
    }

    #[test]
    fn test_custom_hasher_is_used() {
        let engine = Engine::with_hasher(Constant);
        assert_eq!(engine.hasher_name(), "constant");
        let tree = engine.build(&records_from(["x", "y"]));
        assert_eq!(tree.root_digest(), Digest::from_bytes([7u8; 32]));
    }

    #[test]
    fn test_engine_debug_names_hasher() {
        let engine = Engine::new(HasherKind::Blake3);
        assert_eq!(format!("{:?}", engine), "Engine { hasher: \"blake3\" }");
    }
}
