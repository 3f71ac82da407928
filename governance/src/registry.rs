//! The proposal registry — owner of all governance state.
//!
//! Every mutating operation takes the caller's authenticated address and the
//! current time from the embedding environment, checks its preconditions in a
//! fixed order (first failure wins), and either fully applies or leaves all
//! state untouched. `&mut self` receivers give each operation exclusive access
//! to the registry, so operations are atomic and cannot re-enter one another;
//! racing callers are serialized by the environment and the loser receives the
//! matching precondition error.

use crate::commitment::VoteCommitment;
use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalPhase};
use crate::roles::{Role, RoleSet};
use crate::tally::Tally;
use std::collections::HashMap;
use veil_crypto::{identity_leaf, verify_proof};
use veil_types::{Digest, Timestamp, VoteChoice, VoterAddress, VotingParams};

/// Registry of proposals, commitments, voting power, and configuration.
pub struct ProposalRegistry {
    params: VotingParams,
    roles: RoleSet,
    /// All proposals ever created, keyed by id.
    proposals: HashMap<u64, Proposal>,
    /// Flat (proposal, voter) commitment table.
    commitments: HashMap<(u64, VoterAddress), VoteCommitment>,
    /// Explicitly assigned voting power. Absent means weight 1.
    voting_power: HashMap<VoterAddress, u128>,
    next_id: u64,
}

impl ProposalRegistry {
    /// Create a registry with the given configuration and role grants.
    pub fn new(params: VotingParams, roles: RoleSet) -> Self {
        Self {
            params,
            roles,
            proposals: HashMap::new(),
            commitments: HashMap::new(),
            voting_power: HashMap::new(),
            next_id: 1,
        }
    }

    // ── Mutating operations ──────────────────────────────────────────────

    /// Create a proposal. Proposer-gated.
    ///
    /// `voting_period_secs = 0` selects the configured default period; an
    /// explicit period must meet the minimum floor. The reveal period and
    /// quorum always come from the current configuration. The commit window
    /// opens immediately at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_proposal(
        &mut self,
        caller: &VoterAddress,
        title: String,
        description: String,
        content_ref: String,
        eligibility_root: Digest,
        voting_period_secs: u64,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        self.require_role(caller, Role::Proposer)?;
        if title.is_empty() {
            return Err(GovernanceError::EmptyTitle);
        }
        if eligibility_root.is_zero() {
            return Err(GovernanceError::ZeroEligibilityRoot);
        }
        let voting_period = if voting_period_secs == 0 {
            self.params.voting_period_secs
        } else {
            Self::check_period(voting_period_secs)?;
            voting_period_secs
        };

        let id = self.next_id;
        self.next_id += 1;
        let proposal = Proposal::new(
            id,
            caller.clone(),
            title,
            description,
            content_ref,
            eligibility_root,
            self.params.quorum_percent,
            now,
            voting_period,
            self.params.reveal_period_secs,
        );
        tracing::info!(
            proposal = id,
            proposer = %caller,
            end_time = %proposal.end_time,
            reveal_end_time = %proposal.reveal_end_time,
            "proposal created"
        );
        self.proposals.insert(id, proposal);
        Ok(id)
    }

    /// Commit a hidden vote. Open to any eligible identity.
    ///
    /// Preconditions, first failure wins: the proposal exists and is Active;
    /// the commit window is open; the caller has not committed before; the
    /// commitment is non-zero; the Merkle proof places the caller's leaf
    /// under the proposal's eligibility root.
    pub fn commit_vote(
        &mut self,
        caller: &VoterAddress,
        proposal_id: u64,
        commitment: Digest,
        proof: &[Digest],
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = Self::get(&self.proposals, proposal_id)?;
        Self::require_phase(proposal, ProposalPhase::Active)?;
        if now < proposal.start_time {
            return Err(GovernanceError::VotingNotOpen);
        }
        if now >= proposal.end_time {
            return Err(GovernanceError::VotingClosed);
        }
        let key = (proposal_id, caller.clone());
        if self.commitments.contains_key(&key) {
            return Err(GovernanceError::AlreadyVoted(caller.as_str().to_string()));
        }
        if commitment.is_zero() {
            return Err(GovernanceError::ZeroCommitment);
        }
        if !verify_proof(proof, proposal.eligibility_root, identity_leaf(caller)) {
            return Err(GovernanceError::InvalidProof);
        }

        self.commitments
            .insert(key, VoteCommitment::new(commitment, now));
        // The digest is opaque; choice and salt stay unknown to any observer.
        tracing::info!(
            proposal = proposal_id,
            voter = %caller,
            commitment = %commitment,
            "vote committed"
        );
        Ok(())
    }

    /// Reveal a previously committed vote and add its weight to the tally.
    ///
    /// Preconditions: the proposal is still Active (not finalized); the reveal
    /// window is open; a commitment exists for the caller and is unrevealed;
    /// `blake2b(choice ++ salt)` equals the stored commitment.
    pub fn reveal_vote(
        &mut self,
        caller: &VoterAddress,
        proposal_id: u64,
        choice: VoteChoice,
        salt: &[u8; 32],
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = Self::get(&self.proposals, proposal_id)?;
        Self::require_phase(proposal, ProposalPhase::Active)?;
        if now < proposal.end_time {
            return Err(GovernanceError::RevealNotOpen);
        }
        if now >= proposal.reveal_end_time {
            return Err(GovernanceError::RevealClosed);
        }
        let key = (proposal_id, caller.clone());
        let recorded = self
            .commitments
            .get(&key)
            .ok_or_else(|| GovernanceError::CommitmentNotFound(caller.as_str().to_string()))?;
        if recorded.revealed {
            return Err(GovernanceError::AlreadyRevealed(caller.as_str().to_string()));
        }
        if veil_crypto::commitment_hash(choice, salt) != recorded.commitment {
            return Err(GovernanceError::CommitmentMismatch);
        }

        let weight = self.voting_power.get(caller).copied().unwrap_or(1);
        if let Some(recorded) = self.commitments.get_mut(&key) {
            recorded.revealed = true;
        }
        if let Some(proposal) = self.proposals.get_mut(&proposal_id) {
            proposal.tally.add_vote(choice, weight);
        }
        tracing::info!(
            proposal = proposal_id,
            voter = %caller,
            choice = choice.name(),
            weight,
            "vote revealed"
        );
        Ok(())
    }

    /// Variant of [`reveal_vote`](Self::reveal_vote) taking the raw wire byte
    /// for the choice, as submitted by external clients.
    pub fn reveal_vote_raw(
        &mut self,
        caller: &VoterAddress,
        proposal_id: u64,
        choice_byte: u8,
        salt: &[u8; 32],
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let choice = VoteChoice::from_byte(choice_byte)
            .ok_or(GovernanceError::InvalidChoice(choice_byte))?;
        self.reveal_vote(caller, proposal_id, choice, salt, now)
    }

    /// Close out a proposal once its reveal window has ended. Open to anyone.
    ///
    /// Transitions Active → Ended, or Active → Cancelled when the total vote
    /// count falls short of the required quorum. Returns the resulting phase.
    pub fn finalize_proposal(
        &mut self,
        proposal_id: u64,
        now: Timestamp,
    ) -> Result<ProposalPhase, GovernanceError> {
        let proposal = Self::get_mut(&mut self.proposals, proposal_id)?;
        Self::require_phase(proposal, ProposalPhase::Active)?;
        if !proposal.reveal_over(now) {
            return Err(GovernanceError::RevealPeriodNotOver);
        }

        // The stored quorum is the configured percentage value, compared
        // directly against the absolute weighted vote total.
        let phase = if proposal.tally.meets_quorum(u128::from(proposal.quorum)) {
            ProposalPhase::Ended
        } else {
            ProposalPhase::Cancelled
        };
        proposal.phase = phase;
        tracing::info!(
            proposal = proposal_id,
            phase = phase.name(),
            total_votes = proposal.tally.total_votes,
            "proposal finalized"
        );
        Ok(phase)
    }

    /// Execute an ended proposal that passed. Admin-gated. Terminal.
    pub fn execute_proposal(
        &mut self,
        caller: &VoterAddress,
        proposal_id: u64,
    ) -> Result<(), GovernanceError> {
        self.require_role(caller, Role::Admin)?;
        let proposal = Self::get_mut(&mut self.proposals, proposal_id)?;
        Self::require_phase(proposal, ProposalPhase::Ended)?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if !proposal.tally.passed() {
            return Err(GovernanceError::ProposalNotPassed {
                for_votes: proposal.tally.for_votes,
                against_votes: proposal.tally.against_votes,
            });
        }

        proposal.phase = ProposalPhase::Executed;
        proposal.executed = true;
        tracing::info!(proposal = proposal_id, admin = %caller, "proposal executed");
        Ok(())
    }

    /// Cancel an Active proposal. Admin-gated. Terminal.
    pub fn cancel_proposal(
        &mut self,
        caller: &VoterAddress,
        proposal_id: u64,
    ) -> Result<(), GovernanceError> {
        self.require_role(caller, Role::Admin)?;
        let proposal = Self::get_mut(&mut self.proposals, proposal_id)?;
        Self::require_phase(proposal, ProposalPhase::Active)?;

        proposal.phase = ProposalPhase::Cancelled;
        tracing::info!(proposal = proposal_id, admin = %caller, "proposal cancelled");
        Ok(())
    }

    /// Assign explicit voting power to an identity. Admin-gated.
    ///
    /// Weighting is opt-in: identities without an assignment vote with weight
    /// 1, so unweighted participants stay on equal footing.
    pub fn set_voting_power(
        &mut self,
        caller: &VoterAddress,
        identity: VoterAddress,
        weight: u128,
    ) -> Result<(), GovernanceError> {
        self.require_role(caller, Role::Admin)?;
        tracing::debug!(identity = %identity, weight, "voting power assigned");
        self.voting_power.insert(identity, weight);
        Ok(())
    }

    /// Assign voting power to several identities at once. Admin-gated.
    /// Requires equal-length inputs; nothing is applied on mismatch.
    pub fn batch_set_voting_power(
        &mut self,
        caller: &VoterAddress,
        identities: Vec<VoterAddress>,
        weights: Vec<u128>,
    ) -> Result<(), GovernanceError> {
        self.require_role(caller, Role::Admin)?;
        if identities.len() != weights.len() {
            return Err(GovernanceError::LengthMismatch {
                identities: identities.len(),
                weights: weights.len(),
            });
        }
        for (identity, weight) in identities.into_iter().zip(weights) {
            self.voting_power.insert(identity, weight);
        }
        Ok(())
    }

    /// Update the registry-wide voting configuration. Admin-gated.
    ///
    /// Existing proposals keep the boundaries computed at creation; only new
    /// proposals read the updated values.
    pub fn update_voting_parameters(
        &mut self,
        caller: &VoterAddress,
        voting_period_secs: u64,
        reveal_period_secs: u64,
        quorum_percent: u8,
    ) -> Result<(), GovernanceError> {
        self.require_role(caller, Role::Admin)?;
        Self::check_period(voting_period_secs)?;
        Self::check_period(reveal_period_secs)?;
        if quorum_percent > 100 {
            return Err(GovernanceError::QuorumOutOfRange(quorum_percent));
        }

        self.params = VotingParams {
            voting_period_secs,
            reveal_period_secs,
            quorum_percent,
        };
        tracing::info!(
            voting_period_secs,
            reveal_period_secs,
            quorum_percent,
            "voting parameters updated"
        );
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Full metadata of a proposal.
    pub fn proposal(&self, proposal_id: u64) -> Option<&Proposal> {
        self.proposals.get(&proposal_id)
    }

    /// Current phase of a proposal.
    pub fn phase(&self, proposal_id: u64) -> Option<ProposalPhase> {
        self.proposals.get(&proposal_id).map(|p| p.phase)
    }

    /// Current tally of a proposal.
    pub fn tally(&self, proposal_id: u64) -> Option<&Tally> {
        self.proposals.get(&proposal_id).map(|p| &p.tally)
    }

    /// Whether the voter has committed on the proposal.
    pub fn has_committed(&self, proposal_id: u64, voter: &VoterAddress) -> bool {
        self.commitments
            .contains_key(&(proposal_id, voter.clone()))
    }

    /// Whether the voter has revealed on the proposal.
    pub fn has_revealed(&self, proposal_id: u64, voter: &VoterAddress) -> bool {
        self.commitments
            .get(&(proposal_id, voter.clone()))
            .is_some_and(|c| c.revealed)
    }

    /// The voter's commitment record on the proposal, if any.
    pub fn commitment(&self, proposal_id: u64, voter: &VoterAddress) -> Option<&VoteCommitment> {
        self.commitments.get(&(proposal_id, voter.clone()))
    }

    /// Effective voting power of an identity (1 unless explicitly assigned).
    pub fn voting_power_of(&self, identity: &VoterAddress) -> u128 {
        self.voting_power.get(identity).copied().unwrap_or(1)
    }

    /// Current registry configuration.
    pub fn params(&self) -> &VotingParams {
        &self.params
    }

    /// Number of proposals ever created.
    pub fn proposal_count(&self) -> u64 {
        self.next_id - 1
    }

    /// Role grants, for gate checks by the embedding environment.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Mutable role grants. Role administration is the embedding
    /// environment's responsibility.
    pub fn roles_mut(&mut self) -> &mut RoleSet {
        &mut self.roles
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    fn require_role(&self, caller: &VoterAddress, role: Role) -> Result<(), GovernanceError> {
        if self.roles.has_role(caller, role) {
            Ok(())
        } else {
            Err(GovernanceError::MissingRole(role))
        }
    }

    fn require_phase(
        proposal: &Proposal,
        required: ProposalPhase,
    ) -> Result<(), GovernanceError> {
        if proposal.phase == required {
            Ok(())
        } else {
            Err(GovernanceError::WrongPhase {
                required,
                actual: proposal.phase,
            })
        }
    }

    fn check_period(period_secs: u64) -> Result<(), GovernanceError> {
        if period_secs < VotingParams::MIN_PERIOD_SECS {
            return Err(GovernanceError::PeriodTooShort {
                period_secs,
                min_secs: VotingParams::MIN_PERIOD_SECS,
            });
        }
        Ok(())
    }

    fn get(
        proposals: &HashMap<u64, Proposal>,
        proposal_id: u64,
    ) -> Result<&Proposal, GovernanceError> {
        proposals
            .get(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))
    }

    fn get_mut(
        proposals: &mut HashMap<u64, Proposal>,
        proposal_id: u64,
    ) -> Result<&mut Proposal, GovernanceError> {
        proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))
    }
}
