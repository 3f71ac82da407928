//! Role-gated access control.
//!
//! Two roles matter to the registry: admins (parameter updates, voting-power
//! assignment, execute/cancel) and proposers (proposal creation). Granting and
//! revoking is driven by the embedding environment; the registry only consults
//! [`RoleSet::has_role`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use veil_types::VoterAddress;

/// A role an identity can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Proposer,
}

impl Role {
    /// Human-readable name of this role.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Proposer => "proposer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Role membership per identity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoleSet {
    grants: HashMap<VoterAddress, HashSet<Role>>,
}

impl RoleSet {
    /// Create an empty role set.
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Grant a role to an identity. Granting twice is a no-op.
    pub fn grant(&mut self, identity: VoterAddress, role: Role) {
        self.grants.entry(identity).or_default().insert(role);
    }

    /// Revoke a role from an identity. Revoking an absent grant is a no-op.
    pub fn revoke(&mut self, identity: &VoterAddress, role: Role) {
        if let Some(roles) = self.grants.get_mut(identity) {
            roles.remove(&role);
            if roles.is_empty() {
                self.grants.remove(identity);
            }
        }
    }

    /// Whether the identity holds the role.
    pub fn has_role(&self, identity: &VoterAddress, role: Role) -> bool {
        self.grants
            .get(identity)
            .is_some_and(|roles| roles.contains(&role))
    }
}
