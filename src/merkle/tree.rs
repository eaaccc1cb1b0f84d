//! Merkle tree construction

use super::proof::{sibling_position, Proof, ProofStep};
use super::Node;
use crate::hasher::DigestFn;
use crate::model::{Digest, Record};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, trace};

/// A binary merkle tree over an ordered list of records
///
/// Built in one pass and immutable afterwards; any change to the record
/// list means building a new tree. Each level is kept so proofs can be read
/// off without rehashing.
#[derive(Clone, Debug, Default)]
pub struct MerkleTree {
    /// Nodes per level, leaves first and the root level last.
    /// An odd level's last node appears once; its parent pairs it with itself.
    levels: Vec<Vec<Arc<Node>>>,
}

impl MerkleTree {
    /// The empty tree (no records)
    pub fn empty() -> Self {
        MerkleTree { levels: Vec::new() }
    }

    /// Build a tree from records
    ///
    /// Adjacent nodes are paired level by level until one remains. If a
    /// level has odd length its last node is paired with itself.
    pub fn build<H: DigestFn + ?Sized>(hasher: &H, records: &[Record]) -> Self {
        if records.is_empty() {
            debug!("building empty merkle tree");
            return MerkleTree::empty();
        }

        let mut level: Vec<Arc<Node>> = records
            .iter()
            .map(|r| Arc::new(Node::leaf(hasher, r.clone())))
            .collect();
        let mut levels = Vec::new();

        while level.len() > 1 {
            trace!(width = level.len(), "pairing level");
            let next: Vec<Arc<Node>> = level
                .chunks(2)
                .map(|pair| {
                    let left = pair[0].clone();
                    let right = pair.get(1).cloned().unwrap_or_else(|| left.clone());
                    Arc::new(Node::internal(hasher, left, right))
                })
                .collect();
            levels.push(level);
            level = next;
        }
        levels.push(level);

        let tree = MerkleTree { levels };
        debug!(
            hasher = hasher.name(),
            leaves = records.len(),
            depth = tree.depth(),
            root = %tree.root_digest().short(),
            "built merkle tree"
        );
        tree
    }

    /// Get the root node, if any
    pub fn root(&self) -> Option<&Node> {
        self.levels.last().and_then(|l| l.first()).map(|n| &**n)
    }

    /// Get the root digest ([`Digest::ZERO`] for the empty tree)
    pub fn root_digest(&self) -> Digest {
        self.root().map(|n| *n.digest()).unwrap_or(Digest::ZERO)
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of pairing rounds between the leaves and the root
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Records in leaf order
    pub fn leaves(&self) -> Vec<&Record> {
        self.levels
            .first()
            .map(|l| l.iter().filter_map(|n| n.record()).collect())
            .unwrap_or_default()
    }

    /// Digest of the leaf at `index`
    pub fn leaf_digest(&self, index: usize) -> Option<Digest> {
        self.levels.first()?.get(index).map(|n| *n.digest())
    }

    /// Digests of every level, leaves first and the root last
    pub fn levels(&self) -> Vec<Vec<Digest>> {
        self.levels
            .iter()
            .map(|l| l.iter().map(|n| *n.digest()).collect())
            .collect()
    }

    /// Inclusion proof for the leaf at `index`, read from the stored levels
    ///
    /// Returns an empty proof if `index` is out of range.
    pub fn prove(&self, index: usize) -> Proof {
        if index >= self.leaf_count() {
            debug!(index, leaves = self.leaf_count(), "proof index out of range");
            return Proof::empty();
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut idx = index;
        for level in &self.levels[..self.depth()] {
            let (sibling, side) = sibling_position(level.len(), idx);
            steps.push(ProofStep::new(*level[sibling].digest(), side));
            idx /= 2;
        }
        Proof::new(steps)
    }

    /// Indented text view of the tree, root first
    ///
    /// Leaves show their record text; a right child that duplicates its
    /// left sibling is marked `(dup)` and not expanded again.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.root() {
            Some(root) => render_node(root, 0, false, &mut out),
            None => out.push_str("(empty)\n"),
        }
        out
    }
}

fn render_node(node: &Node, depth: usize, duplicate: bool, out: &mut String) {
    let indent = "  ".repeat(depth);
    let short = node.digest().short();
    if duplicate {
        let _ = writeln!(out, "{}{} (dup)", indent, short);
        return;
    }
    match node {
        Node::Leaf { record, .. } => {
            let _ = writeln!(out, "{}{} {:?}", indent, short, record.to_text());
        }
        Node::Internal { left, right, .. } => {
            let _ = writeln!(out, "{}{}", indent, short);
            render_node(left, depth + 1, false, out);
            render_node(right, depth + 1, Arc::ptr_eq(left, right), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{Blake3, ToyChecksum};
    use crate::model::records_from;

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::build(&ToyChecksum, &[]);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.root_digest(), Digest::ZERO);
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.prove(0).is_empty());
    }

    #[test]
    fn test_single_record_root_is_leaf() {
        let records = records_from(["only"]);
        let tree = MerkleTree::build(&ToyChecksum, &records);

        assert_eq!(tree.root_digest(), ToyChecksum.digest(b"only"));
        assert!(tree.root().unwrap().is_leaf());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_four_records_structure() {
        let h = Blake3;
        let records = records_from(["A", "B", "C", "D"]);
        let tree = MerkleTree::build(&h, &records);

        let (a, b, c, d) = (
            h.digest(b"A"),
            h.digest(b"B"),
            h.digest(b"C"),
            h.digest(b"D"),
        );
        let expected = h.combine(&h.combine(&a, &b), &h.combine(&c, &d));
        assert_eq!(tree.root_digest(), expected);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let h = Blake3;
        let records = records_from(["A", "B", "C"]);
        let tree = MerkleTree::build(&h, &records);

        let (a, b, c) = (h.digest(b"A"), h.digest(b"B"), h.digest(b"C"));
        let expected = h.combine(&h.combine(&a, &b), &h.combine(&c, &c));
        assert_eq!(tree.root_digest(), expected);

        let (_, right) = tree.root().unwrap().children().unwrap();
        let (rl, rr) = right.children().unwrap();
        assert_eq!(rl.digest(), rr.digest());
    }

    #[test]
    fn test_levels_shape() {
        let records = records_from(["1", "2", "3", "4", "5"]);
        let tree = MerkleTree::build(&ToyChecksum, &records);
        let widths: Vec<_> = tree.levels().iter().map(Vec::len).collect();
        assert_eq!(widths, vec![5, 3, 2, 1]);
        assert_eq!(tree.levels().last().unwrap()[0], tree.root_digest());
    }

    #[test]
    fn test_order_changes_root() {
        let h = Blake3;
        let ab = MerkleTree::build(&h, &records_from(["A", "B"]));
        let ba = MerkleTree::build(&h, &records_from(["B", "A"]));
        assert_ne!(ab.root_digest(), ba.root_digest());
    }

    #[test]
    fn test_leaves_in_order() {
        let records = records_from(["x", "y", "z"]);
        let tree = MerkleTree::build(&ToyChecksum, &records);
        let leaves: Vec<_> = tree.leaves().iter().map(|r| r.to_text()).collect();
        assert_eq!(leaves, vec!["x", "y", "z"]);
        assert_eq!(tree.leaf_digest(2), Some(ToyChecksum.digest(b"z")));
        assert_eq!(tree.leaf_digest(3), None);
    }

    #[test]
    fn test_render_marks_duplicate() {
        let tree = MerkleTree::build(&ToyChecksum, &records_from(["A", "B", "C"]));
        let text = tree.render();
        assert!(text.contains("\"A\""));
        assert!(text.contains("\"C\""));
        assert!(text.contains("(dup)"));
        assert!(text.starts_with(&tree.root_digest().short()));
    }

    #[test]
    fn test_render_labels_distinct_leaves() {
        let tree = MerkleTree::build(&ToyChecksum, &records_from(["A", "B", "C"]));
        let text = tree.render();
        let labels: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|r| {
                let line = text
                    .lines()
                    .find(|l| l.ends_with(&format!("{:?}", r)))
                    .unwrap();
                line.split_whitespace().next().unwrap().to_string()
            })
            .collect();
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(MerkleTree::empty().render(), "(empty)\n");
    }
}
