//! Inclusion proofs: generation from records and verification

use crate::hasher::DigestFn;
use crate::model::{Digest, Record};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Which side of the path node a sibling digest sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left child; combine as `(sibling, running)`
    Left,
    /// Sibling is the right child; combine as `(running, sibling)`
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of an inclusion proof
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub digest: Digest,
    pub side: Side,
}

impl ProofStep {
    pub fn new(digest: Digest, side: Side) -> Self {
        ProofStep { digest, side }
    }
}

/// Parses `left:<hex>` / `right:<hex>` (also `l:` / `r:`)
impl FromStr for ProofStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (side, hex) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidProofStep(format!("expected <side>:<hex>, got {}", s)))?;
        let side = match side.to_ascii_lowercase().as_str() {
            "left" | "l" => Side::Left,
            "right" | "r" => Side::Right,
            other => return Err(Error::InvalidProofStep(format!("unknown side: {}", other))),
        };
        Ok(ProofStep::new(hex.parse()?, side))
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side, self.digest)
    }
}

/// An inclusion proof: sibling digests from the leaf level up to just
/// below the root
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Proof { steps }
    }

    /// The empty proof (out-of-range index, empty input, or a single leaf)
    pub fn empty() -> Self {
        Proof::default()
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [ProofStep] {
        &mut self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Fold the steps over `leaf`, returning the implied root digest
    pub fn compute_root<H: DigestFn + ?Sized>(&self, hasher: &H, leaf: &Digest) -> Digest {
        self.steps.iter().fold(*leaf, |running, step| match step.side {
            Side::Left => hasher.combine(&step.digest, &running),
            Side::Right => hasher.combine(&running, &step.digest),
        })
    }

    /// Compact binary encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from [`Proof::to_bytes`] output
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        Proof::new(iter.into_iter().collect())
    }
}

/// Sibling of the node at `index` in a level of `len` nodes
///
/// An odd index always has its sibling on the left. An even index pairs
/// with the next node, or with itself when it is the last of an odd level.
pub(crate) fn sibling_position(len: usize, index: usize) -> (usize, Side) {
    if index % 2 == 1 {
        (index - 1, Side::Left)
    } else if index + 1 < len {
        (index + 1, Side::Right)
    } else {
        (index, Side::Right)
    }
}

/// Pair adjacent digests into the next level, duplicating an odd tail
pub(crate) fn pair_level<H: DigestFn + ?Sized>(hasher: &H, level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hasher.combine(left, right)
        })
        .collect()
}

/// Generate an inclusion proof for `records[index]`
///
/// Repeats the builder's pairing, recording the path node's sibling at each
/// level. Returns an empty proof if `records` is empty or `index` is out of
/// range.
pub fn prove<H: DigestFn + ?Sized>(hasher: &H, records: &[Record], index: usize) -> Proof {
    if index >= records.len() {
        debug!(index, leaves = records.len(), "proof index out of range");
        return Proof::empty();
    }

    let mut level: Vec<Digest> = records
        .iter()
        .map(|r| hasher.digest(r.as_bytes()))
        .collect();
    let mut idx = index;
    let mut steps = Vec::new();

    while level.len() > 1 {
        let (sibling, side) = sibling_position(level.len(), idx);
        trace!(width = level.len(), idx, sibling, %side, "proof step");
        steps.push(ProofStep::new(level[sibling], side));
        level = pair_level(hasher, &level);
        idx /= 2;
    }

    debug!(index, steps = steps.len(), "generated proof");
    Proof::new(steps)
}

/// Check that `proof` leads from `leaf` to `root`
///
/// Never fails: a malformed or mismatched proof just yields `false`.
pub fn verify<H: DigestFn + ?Sized>(hasher: &H, leaf: &Digest, proof: &Proof, root: &Digest) -> bool {
    let computed = proof.compute_root(hasher, leaf);
    let valid = computed == *root;
    debug!(
        steps = proof.len(),
        computed = %computed.short(),
        expected = %root.short(),
        valid,
        "verified proof"
    );
    valid
}
