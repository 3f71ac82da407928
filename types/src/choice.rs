//! The three valid vote choices and their wire encoding.

use serde::{Deserialize, Serialize};

/// A vote choice.
///
/// The byte values are the wire contract: commitments are computed as
/// `blake2b(choice byte ++ salt)`, so clients and the registry must agree on
/// this encoding exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Abstain = 0,
    For = 1,
    Against = 2,
}

impl VoteChoice {
    /// Wire encoding of this choice.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Decode a wire byte. Returns `None` for anything outside the enum.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Abstain),
            1 => Some(Self::For),
            2 => Some(Self::Against),
            _ => None,
        }
    }

    /// Human-readable name of this choice.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abstain => "abstain",
            Self::For => "for",
            Self::Against => "against",
        }
    }
}
