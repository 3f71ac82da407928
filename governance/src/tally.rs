//! Weighted per-choice vote accumulation.

use serde::{Deserialize, Serialize};
use veil_types::VoteChoice;

/// Accumulated weighted votes for a proposal.
///
/// Pure accumulation with no lifecycle of its own — it lives inside
/// [`Proposal`](crate::Proposal) and is only ever mutated through
/// [`add_vote`](Self::add_vote) as reveals arrive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub for_votes: u128,
    pub against_votes: u128,
    pub abstain_votes: u128,
    /// Sum of all three counters, maintained alongside them.
    pub total_votes: u128,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a revealed vote of the given weight to its choice counter and to
    /// the total.
    pub fn add_vote(&mut self, choice: VoteChoice, weight: u128) {
        let counter = match choice {
            VoteChoice::For => &mut self.for_votes,
            VoteChoice::Against => &mut self.against_votes,
            VoteChoice::Abstain => &mut self.abstain_votes,
        };
        *counter = counter.saturating_add(weight);
        self.total_votes = self.total_votes.saturating_add(weight);
    }

    /// Whether the proposal passed: strictly more weight for than against.
    pub fn passed(&self) -> bool {
        self.for_votes > self.against_votes
    }

    /// Whether total participation reached the given threshold.
    pub fn meets_quorum(&self, threshold: u128) -> bool {
        self.total_votes >= threshold
    }
}
