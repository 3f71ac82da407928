//! Voter address type with `veil_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A voter identity, always prefixed with `veil_`.
///
/// The embedding environment authenticates callers and hands the registry an
/// already-verified address; eligibility leaves are derived by hashing the
/// address bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterAddress(String);

impl VoterAddress {
    /// The standard prefix for all Veil voter addresses.
    pub const PREFIX: &'static str = "veil_";

    /// Create a new voter address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `veil_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with veil_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes of the address, as hashed into an eligibility leaf.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VoterAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
