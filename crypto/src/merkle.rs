//! Merkle eligibility trees with sorted-pair hashing.
//!
//! Parent nodes are computed as `blake2b(min(a, b) ++ max(a, b))`, so the
//! order in which two children are fed to the hash never matters — a proof
//! carries only the sibling digests, not left/right position bits. A lone
//! node at the end of an odd-length level is promoted to the next level
//! unhashed.

use crate::hash::blake2b_256_multi;
use serde::{Deserialize, Serialize};
use veil_types::Digest;

/// Hash a pair of nodes in sorted order.
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Digest::new(blake2b_256_multi(&[lo.as_bytes(), hi.as_bytes()]))
}

/// Verify a Merkle inclusion proof.
///
/// Folds the proof over `leaf` with sorted-pair hashing and compares the
/// result to `root`. This is a predicate, not a fallible operation: any
/// mismatch — wrong leaf, wrong root, tampered or truncated proof — returns
/// `false`. A leaf that was not part of the set at tree construction time can
/// never produce a valid proof.
pub fn verify_proof(proof: &[Digest], root: Digest, leaf: Digest) -> bool {
    let mut acc = leaf;
    for sibling in proof {
        acc = hash_pair(&acc, sibling);
    }
    acc == root
}

/// An eligibility set committed to as a Merkle tree.
///
/// This is the client-side half of the wire contract: whoever assembles the
/// eligibility set builds the tree, publishes [`root`](Self::root) with the
/// proposal, and hands each voter their [`proof`](Self::proof).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MerkleTree {
    /// `layers[0]` is the leaf level; the last layer holds the root.
    layers: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree over the given leaves, in the order supplied.
    pub fn build(leaves: Vec<Digest>) -> Self {
        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let next = {
                let prev = &layers[layers.len() - 1];
                let mut next = Vec::with_capacity((prev.len() + 1) / 2);
                for pair in prev.chunks(2) {
                    if let [a, b] = pair {
                        next.push(hash_pair(a, b));
                    } else {
                        // odd node promoted unhashed
                        next.push(pair[0]);
                    }
                }
                next
            };
            layers.push(next);
        }
        Self { layers }
    }

    /// The committed root. `Digest::ZERO` for an empty tree.
    pub fn root(&self) -> Digest {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(Digest::ZERO)
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Inclusion proof for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, mut index: usize) -> Option<Vec<Digest>> {
        if index >= self.layers[0].len() {
            return None;
        }
        let mut proof = Vec::new();
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            if sibling < layer.len() {
                proof.push(layer[sibling]);
            }
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::identity_leaf;
    use veil_types::VoterAddress;

    fn leaf(name: &str) -> Digest {
        identity_leaf(&VoterAddress::new(format!("veil_{name}")))
    }

    #[test]
    fn pair_hashing_is_order_independent() {
        let a = leaf("alice");
        let b = leaf("bob");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn single_leaf_tree_root_is_leaf() {
        let tree = MerkleTree::build(vec![leaf("alice")]);
        assert_eq!(tree.root(), leaf("alice"));
        assert_eq!(tree.proof(0), Some(vec![]));
        assert!(verify_proof(&[], tree.root(), leaf("alice")));
    }

    #[test]
    fn empty_tree_has_zero_root() {
        let tree = MerkleTree::build(vec![]);
        assert_eq!(tree.root(), Digest::ZERO);
        assert_eq!(tree.proof(0), None);
    }

    #[test]
    fn every_leaf_of_three_verifies() {
        let leaves = vec![leaf("alice"), leaf("bob"), leaf("carol")];
        let tree = MerkleTree::build(leaves.clone());

        for (i, l) in leaves.iter().enumerate() {
            let proof = tree.proof(i).expect("in range");
            assert!(verify_proof(&proof, tree.root(), *l), "leaf {i} failed");
        }
    }

    #[test]
    fn foreign_leaf_never_verifies() {
        let tree = MerkleTree::build(vec![leaf("alice"), leaf("bob"), leaf("carol")]);

        // A proof for any committed leaf does not validate dave.
        for i in 0..3 {
            let proof = tree.proof(i).expect("in range");
            assert!(!verify_proof(&proof, tree.root(), leaf("dave")));
        }
    }

    #[test]
    fn tampered_proof_fails() {
        let leaves = vec![leaf("alice"), leaf("bob"), leaf("carol"), leaf("dave")];
        let tree = MerkleTree::build(leaves.clone());

        let mut proof = tree.proof(1).expect("in range");
        proof[0] = leaf("mallory");
        assert!(!verify_proof(&proof, tree.root(), leaves[1]));
    }

    #[test]
    fn truncated_proof_fails() {
        let leaves = vec![leaf("alice"), leaf("bob"), leaf("carol"), leaf("dave")];
        let tree = MerkleTree::build(leaves.clone());

        let proof = tree.proof(2).expect("in range");
        assert!(!verify_proof(&proof[..proof.len() - 1], tree.root(), leaves[2]));
    }

    #[test]
    fn wrong_root_fails() {
        let leaves = vec![leaf("alice"), leaf("bob")];
        let tree = MerkleTree::build(leaves.clone());
        let proof = tree.proof(0).expect("in range");

        assert!(!verify_proof(&proof, leaf("mallory"), leaves[0]));
    }

    #[test]
    fn proof_out_of_range_is_none() {
        let tree = MerkleTree::build(vec![leaf("alice"), leaf("bob")]);
        assert_eq!(tree.proof(2), None);
    }

    #[test]
    fn odd_leaf_counts_verify() {
        for count in [1usize, 3, 5, 7, 9] {
            let leaves: Vec<Digest> = (0..count).map(|i| leaf(&format!("v{i}"))).collect();
            let tree = MerkleTree::build(leaves.clone());
            for (i, l) in leaves.iter().enumerate() {
                let proof = tree.proof(i).expect("in range");
                assert!(
                    verify_proof(&proof, tree.root(), *l),
                    "leaf {i} of {count} failed"
                );
            }
        }
    }

    #[test]
    fn root_depends_on_leaf_set() {
        let t1 = MerkleTree::build(vec![leaf("alice"), leaf("bob")]);
        let t2 = MerkleTree::build(vec![leaf("alice"), leaf("carol")]);
        assert_ne!(t1.root(), t2.root());
    }
}
