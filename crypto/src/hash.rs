//! Blake2b hashing for commitments and eligibility leaves.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use veil_types::{Digest, VoteChoice, VoterAddress};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive the eligibility-tree leaf for a voter: `blake2b(address bytes)`.
pub fn identity_leaf(voter: &VoterAddress) -> Digest {
    Digest::new(blake2b_256(voter.as_bytes()))
}

/// Compute a vote commitment: `blake2b(choice byte ++ 32-byte salt)`.
///
/// The commitment is binding (revealing a different choice requires a hash
/// collision) and hiding (without the salt the digest leaks nothing about the
/// choice).
pub fn commitment_hash(choice: VoteChoice, salt: &[u8; 32]) -> Digest {
    Digest::new(blake2b_256_multi(&[&[choice.as_byte()], salt]))
}

/// Generate a fresh 32-byte commitment salt from the OS random source.
pub fn generate_salt() -> [u8; 32] {
    let mut salt = [0u8; 32];
    getrandom::getrandom(&mut salt).expect("OS randomness source unavailable");
    salt
}
