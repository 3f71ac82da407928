use crate::proposal::ProposalPhase;
use crate::roles::Role;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("caller lacks the {0} role")]
    MissingRole(Role),

    #[error("proposal title must not be empty")]
    EmptyTitle,

    #[error("eligibility root must not be zero")]
    ZeroEligibilityRoot,

    #[error("commitment must not be zero")]
    ZeroCommitment,

    #[error("invalid vote choice byte {0}")]
    InvalidChoice(u8),

    #[error("batch length mismatch: {identities} identities, {weights} weights")]
    LengthMismatch { identities: usize, weights: usize },

    #[error("period of {period_secs}s is below the {min_secs}s minimum")]
    PeriodTooShort { period_secs: u64, min_secs: u64 },

    #[error("quorum {0}% exceeds 100%")]
    QuorumOutOfRange(u8),

    #[error("proposal is in phase {actual:?}, operation requires {required:?}")]
    WrongPhase {
        required: ProposalPhase,
        actual: ProposalPhase,
    },

    #[error("voting window has not opened yet")]
    VotingNotOpen,

    #[error("voting window has closed")]
    VotingClosed,

    #[error("reveal window has not opened yet")]
    RevealNotOpen,

    #[error("reveal window has closed")]
    RevealClosed,

    #[error("reveal window has not ended yet")]
    RevealPeriodNotOver,

    #[error("voter {0} has already committed a vote on this proposal")]
    AlreadyVoted(String),

    #[error("voter {0} has already revealed their vote on this proposal")]
    AlreadyRevealed(String),

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("no commitment found for voter {0} on this proposal")]
    CommitmentNotFound(String),

    #[error("eligibility proof does not verify against the proposal root")]
    InvalidProof,

    #[error("revealed choice and salt do not match the stored commitment")]
    CommitmentMismatch,

    #[error("proposal did not pass: {for_votes} for, {against_votes} against")]
    ProposalNotPassed {
        for_votes: u128,
        against_votes: u128,
    },
}
