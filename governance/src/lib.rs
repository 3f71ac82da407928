//! Commit-reveal governance for the Veil protocol.
//!
//! Eligible voters commit a hidden choice during the voting window, then
//! disclose it during the reveal window; only disclosed votes are tallied.
//! Eligibility is proven against a Merkle root committed at proposal creation,
//! so the full voter set never needs to be published.
//!
//! ## Module overview
//!
//! - [`proposal`] — Proposal data and the phase state machine
//!   (Active → Ended → Executed, with Cancelled branches).
//! - [`registry`] — The [`ProposalRegistry`] owning all proposals and
//!   exposing every mutating operation and query.
//! - [`commitment`] — Per-voter commitment records.
//! - [`tally`] — Weighted per-choice accumulation and pass/quorum queries.
//! - [`roles`] — Admin/proposer gate checks.
//! - [`error`] — Governance error types.

pub mod commitment;
pub mod error;
pub mod proposal;
pub mod registry;
pub mod roles;
pub mod tally;

pub use commitment::VoteCommitment;
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalPhase};
pub use registry::ProposalRegistry;
pub use roles::{Role, RoleSet};
pub use tally::Tally;
