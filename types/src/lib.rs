//! Fundamental types for the Veil voting protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: voter addresses, digests, timestamps, vote choices, and the
//! governance parameters.

pub mod address;
pub mod choice;
pub mod hash;
pub mod params;
pub mod time;

pub use address::VoterAddress;
pub use choice::VoteChoice;
pub use hash::Digest;
pub use params::VotingParams;
pub use time::Timestamp;
