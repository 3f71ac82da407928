//! Cryptographic primitives for the Veil voting protocol.
//!
//! Blake2b-256 is the single hash function used everywhere: vote commitments,
//! eligibility leaves, and Merkle tree nodes. The [`merkle`] module carries
//! both halves of the eligibility wire contract — proof verification (used by
//! the registry) and tree construction (used by clients preparing proofs).

pub mod hash;
pub mod merkle;

pub use hash::{blake2b_256, blake2b_256_multi, commitment_hash, generate_salt, identity_leaf};
pub use merkle::{verify_proof, MerkleTree};
