//! # merkle_primer
//!
//! A teaching Merkle engine: binary hash trees over ordered records, with
//! inclusion proofs and their verification.
//!
//! The demos this grew out of use a toy rolling checksum instead of a real
//! hash, so that is the default digest function here too. BLAKE3 is one
//! flag away, and the tree code works with any [`DigestFn`].
//!
//! ## Core Concepts
//!
//! - **Records**: opaque leaf payloads, order-significant
//! - **Digests**: 32-byte outputs of a deterministic one-way function
//! - **Trees**: built by pairing each level until one root remains
//! - **Proofs**: sibling digests that lead a leaf back to the root
//!
//! ## Example
//!
//! ```
//! use merkle_primer::{records_from, Engine, HasherKind};
//!
//! let engine = Engine::new(HasherKind::Blake3);
//! let records = records_from(["A", "B", "C", "D"]);
//! let tree = engine.build(&records);
//!
//! let proof = engine.prove(&records, 1);
//! let leaf = engine.leaf_digest(&records[1]);
//! assert!(engine.verify(&leaf, &proof, &tree.root_digest()));
//! ```

pub mod config;
pub mod hasher;
pub mod merkle;
pub mod model;

mod engine;
mod error;

pub use config::{Config, OutputFormat};
pub use engine::Engine;
pub use error::{Error, Result};
pub use hasher::{Blake3, DigestFn, HasherKind, ToyChecksum};
pub use merkle::{prove, verify, MerkleTree, Node, Proof, ProofStep, Side};
pub use model::{records_from, Digest, Record, DIGEST_LEN};
