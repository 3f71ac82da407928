//! Governance parameters — the registry-wide voting configuration.
//!
//! Owned by the registry and injected at construction; mutated only through
//! the admin-gated update operation. New proposals read these values as
//! fallback defaults.

use serde::{Deserialize, Serialize};

/// Registry-wide voting configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VotingParams {
    /// Default length of the commit window, in seconds. Used when a proposal
    /// is created without an explicit voting period.
    pub voting_period_secs: u64,

    /// Length of the reveal window that follows the commit window, in seconds.
    pub reveal_period_secs: u64,

    /// Required quorum, stored as a percentage (0–100).
    pub quorum_percent: u8,
}

impl VotingParams {
    /// Minimum accepted length for either window, in seconds.
    pub const MIN_PERIOD_SECS: u64 = 1;

    /// Veil defaults — the intended configuration for a live deployment.
    pub fn veil_defaults() -> Self {
        Self {
            voting_period_secs: 3 * 24 * 3600, // 3 days
            reveal_period_secs: 24 * 3600,     // 1 day
            quorum_percent: 10,
        }
    }
}

/// Default is the Veil configuration.
impl Default for VotingParams {
    fn default() -> Self {
        Self::veil_defaults()
    }
}
