//! Proposals and their phase state machine.

use crate::tally::Tally;
use serde::{Deserialize, Serialize};
use veil_types::{Digest, Timestamp, VoterAddress};

/// The lifecycle phase of a proposal.
///
/// Transitions are monotonic and one-directional:
/// Active → Ended (finalize with quorum), Active → Cancelled (admin cancel, or
/// finalize below quorum), Ended → Executed (admin execute). Nothing ever
/// returns to Active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalPhase {
    /// Reserved. No current transition produces this phase; proposals are
    /// created directly in [`Active`](Self::Active).
    Pending,
    /// Commit and reveal windows are open (which one depends on the clock).
    Active,
    /// Finalized with quorum reached; awaiting execution.
    Ended,
    /// Executed by an admin. Terminal.
    Executed,
    /// Cancelled by an admin, or finalized below quorum. Terminal.
    Cancelled,
}

impl ProposalPhase {
    /// Whether this phase admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Cancelled)
    }

    /// Human-readable name of this phase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Ended => "ended",
            Self::Executed => "executed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A single proposal with its phase metadata and running tally.
///
/// Owned exclusively by the [`ProposalRegistry`](crate::ProposalRegistry) and
/// mutated only through its state-machine operations. Proposals are
/// append-only history: created once, never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential id assigned by the registry, starting at 1.
    pub id: u64,
    /// Who created the proposal.
    pub proposer: VoterAddress,
    /// Short human-readable title. Never empty.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Opaque reference to off-registry proposal content.
    pub content_ref: String,
    /// Merkle root of the eligible-voter set. Never zero.
    pub eligibility_root: Digest,
    /// When the commit window opened (creation time).
    pub start_time: Timestamp,
    /// Commit window close / reveal window open: `start_time + voting period`.
    pub end_time: Timestamp,
    /// Reveal window close: `end_time + reveal period`.
    pub reveal_end_time: Timestamp,
    /// Current lifecycle phase.
    pub phase: ProposalPhase,
    /// Required quorum, as the configured percentage value at creation time.
    pub quorum: u8,
    /// Accumulated weighted votes from reveals.
    pub tally: Tally,
    /// Set once by a successful execute.
    pub executed: bool,
}

impl Proposal {
    /// Create a proposal opening its commit window at `now`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: u64,
        proposer: VoterAddress,
        title: String,
        description: String,
        content_ref: String,
        eligibility_root: Digest,
        quorum: u8,
        now: Timestamp,
        voting_period_secs: u64,
        reveal_period_secs: u64,
    ) -> Self {
        let end_time = now.add_secs(voting_period_secs);
        Self {
            id,
            proposer,
            title,
            description,
            content_ref,
            eligibility_root,
            start_time: now,
            end_time,
            reveal_end_time: end_time.add_secs(reveal_period_secs),
            phase: ProposalPhase::Active,
            quorum,
            tally: Tally::new(),
            executed: false,
        }
    }

    /// Whether the commit window is open: `start_time <= now < end_time`.
    pub fn commit_open(&self, now: Timestamp) -> bool {
        self.start_time <= now && now < self.end_time
    }

    /// Whether the reveal window is open: `end_time <= now < reveal_end_time`.
    pub fn reveal_open(&self, now: Timestamp) -> bool {
        self.end_time <= now && now < self.reveal_end_time
    }

    /// Whether the reveal window has closed.
    pub fn reveal_over(&self, now: Timestamp) -> bool {
        now >= self.reveal_end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_proposal(start: u64, voting: u64, reveal: u64) -> Proposal {
        Proposal::new(
            1,
            VoterAddress::new("veil_proposer"),
            "Fund the node operators".to_string(),
            "Quarterly budget".to_string(),
            "ipfs://bafy".to_string(),
            Digest::new([1u8; 32]),
            10,
            Timestamp::new(start),
            voting,
            reveal,
        )
    }

    #[test]
    fn window_boundaries_derived_from_periods() {
        let p = make_proposal(1000, 600, 300);

        assert_eq!(p.start_time, Timestamp::new(1000));
        assert_eq!(p.end_time, Timestamp::new(1600));
        assert_eq!(p.reveal_end_time, Timestamp::new(1900));
        assert_eq!(p.phase, ProposalPhase::Active);
        assert!(!p.executed);
    }

    #[test]
    fn commit_window_half_open() {
        let p = make_proposal(1000, 600, 300);

        assert!(!p.commit_open(Timestamp::new(999)));
        assert!(p.commit_open(Timestamp::new(1000)));
        assert!(p.commit_open(Timestamp::new(1599)));
        assert!(!p.commit_open(Timestamp::new(1600)));
    }

    #[test]
    fn reveal_window_half_open() {
        let p = make_proposal(1000, 600, 300);

        assert!(!p.reveal_open(Timestamp::new(1599)));
        assert!(p.reveal_open(Timestamp::new(1600)));
        assert!(p.reveal_open(Timestamp::new(1899)));
        assert!(!p.reveal_open(Timestamp::new(1900)));
    }

    #[test]
    fn reveal_over_at_boundary() {
        let p = make_proposal(1000, 600, 300);

        assert!(!p.reveal_over(Timestamp::new(1899)));
        assert!(p.reveal_over(Timestamp::new(1900)));
    }

    #[test]
    fn windows_never_overlap() {
        let p = make_proposal(50, 10, 10);
        for secs in 0..100 {
            let now = Timestamp::new(secs);
            let open = [p.commit_open(now), p.reveal_open(now), p.reveal_over(now)];
            assert!(open.iter().filter(|o| **o).count() <= 1, "at {secs}");
        }
    }

    #[test]
    fn terminal_phases() {
        assert!(!ProposalPhase::Pending.is_terminal());
        assert!(!ProposalPhase::Active.is_terminal());
        assert!(!ProposalPhase::Ended.is_terminal());
        assert!(ProposalPhase::Executed.is_terminal());
        assert!(ProposalPhase::Cancelled.is_terminal());
    }
}
