//! Binary merkle tree with inclusion proofs
//!
//! - Leaves are the digests of the records, in order
//! - Each internal node's digest combines its two children's digests
//! - An odd level pairs its last node with itself
//! - A proof lists sibling digests from the leaf up to just below the root

mod node;
mod proof;
mod tree;

pub use node::Node;
pub use proof::{prove, verify, Proof, ProofStep, Side};
pub use tree::MerkleTree;
