//! Tree node types

use crate::hasher::DigestFn;
use crate::model::{Digest, Record};
use std::sync::Arc;

/// A node in the merkle tree
///
/// Children are reference-counted so an odd level's last node can be
/// paired with itself without copying the subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A leaf wrapping one record
    Leaf {
        /// The record's payload
        record: Record,
        /// Digest of the record
        digest: Digest,
    },
    /// An internal node with exactly two children
    Internal {
        left: Arc<Node>,
        right: Arc<Node>,
        /// `combine(left.digest, right.digest)`
        digest: Digest,
    },
}

impl Node {
    /// Create a leaf node
    pub fn leaf<H: DigestFn + ?Sized>(hasher: &H, record: Record) -> Self {
        let digest = hasher.digest(record.as_bytes());
        Node::Leaf { record, digest }
    }

    /// Create an internal node from two children
    pub fn internal<H: DigestFn + ?Sized>(hasher: &H, left: Arc<Node>, right: Arc<Node>) -> Self {
        let digest = hasher.combine(left.digest(), right.digest());
        Node::Internal {
            left,
            right,
            digest,
        }
    }

    pub fn digest(&self) -> &Digest {
        match self {
            Node::Leaf { digest, .. } | Node::Internal { digest, .. } => digest,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The record if this is a leaf
    pub fn record(&self) -> Option<&Record> {
        match self {
            Node::Leaf { record, .. } => Some(record),
            Node::Internal { .. } => None,
        }
    }

    /// Left and right children if this is an internal node
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// True when both children are the same shared node
    pub fn is_duplicated(&self) -> bool {
        match self {
            Node::Leaf { .. } => false,
            Node::Internal { left, right, .. } => Arc::ptr_eq(left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::ToyChecksum;

    #[test]
    fn test_leaf_digest_is_record_digest() {
        let node = Node::leaf(&ToyChecksum, Record::from("A"));
        assert_eq!(*node.digest(), ToyChecksum.digest(b"A"));
        assert!(node.is_leaf());
        assert_eq!(node.record().unwrap().to_text(), "A");
    }

    #[test]
    fn test_internal_digest_combines_children() {
        let a = Arc::new(Node::leaf(&ToyChecksum, Record::from("A")));
        let b = Arc::new(Node::leaf(&ToyChecksum, Record::from("B")));
        let parent = Node::internal(&ToyChecksum, a.clone(), b.clone());

        assert_eq!(
            *parent.digest(),
            ToyChecksum.combine(a.digest(), b.digest())
        );
        assert!(!parent.is_duplicated());
        assert!(parent.record().is_none());
    }

    #[test]
    fn test_duplicated_child_detected() {
        let a = Arc::new(Node::leaf(&ToyChecksum, Record::from("A")));
        let parent = Node::internal(&ToyChecksum, a.clone(), a);
        assert!(parent.is_duplicated());
    }
}
