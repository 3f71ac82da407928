//! Per-voter commitment records.

use serde::{Deserialize, Serialize};
use veil_types::{Digest, Timestamp};

/// A single voter's commitment on a proposal.
///
/// Created at most once per (proposal, voter) pair, at commit time; mutated
/// exactly once, at reveal time, to set `revealed`. Never deleted — the
/// registry keeps full append-only history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteCommitment {
    /// The opaque commitment digest: `blake2b(choice byte ++ salt)`.
    pub commitment: Digest,
    /// When the commitment was recorded.
    pub committed_at: Timestamp,
    /// Whether the voter has disclosed the underlying (choice, salt) pair.
    pub revealed: bool,
}

impl VoteCommitment {
    pub fn new(commitment: Digest, committed_at: Timestamp) -> Self {
        Self {
            commitment,
            committed_at,
            revealed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_commitment_is_unrevealed() {
        let c = VoteCommitment::new(Digest::new([5u8; 32]), Timestamp::new(1000));

        assert_eq!(c.commitment, Digest::new([5u8; 32]));
        assert_eq!(c.committed_at, Timestamp::new(1000));
        assert!(!c.revealed);
    }

    #[test]
    fn bincode_roundtrip() {
        let c = VoteCommitment::new(Digest::new([9u8; 32]), Timestamp::new(42));
        let encoded = bincode::serialize(&c).unwrap();
        let decoded: VoteCommitment = bincode::deserialize(&encoded).unwrap();

        assert_eq!(decoded.commitment, c.commitment);
        assert_eq!(decoded.committed_at, c.committed_at);
        assert_eq!(decoded.revealed, c.revealed);
    }
}
