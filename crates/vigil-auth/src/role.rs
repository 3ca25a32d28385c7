//! Role and Resolution State Machines
//!
//! ```text
//! Unresolved
//!   ↓ start
//! Resolving ──deadline──▶ TimedOut
//!   ↓ decided               ↓ forced reset
//! Resolved ◀───────────────┘
//!   ↓ re-validation
//! Resolving
//! ```

use serde::{Deserialize, Serialize};

/// Mutually exclusive classification of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Registered,
    Unregistered,
}

impl Role {
    /// True for any signed-in identity.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Unregistered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Registered => "registered",
            Role::Unregistered => "unregistered",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "registered" => Ok(Role::Registered),
            "unregistered" => Ok(Role::Unregistered),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Progress of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionState {
    /// Nothing attempted yet
    Unresolved,
    /// Probes in flight
    Resolving,
    /// A decided role is cached
    Resolved,
    /// The deadline expired before the probes settled
    TimedOut,
}

impl ResolutionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: ResolutionState) -> bool {
        match (self, target) {
            // Resolution starts
            (ResolutionState::Unresolved, ResolutionState::Resolving) => true,
            // A local reset may decide without ever probing
            (ResolutionState::Unresolved, ResolutionState::Resolved) => true,
            // A pass either decides or runs out of time
            (ResolutionState::Resolving, ResolutionState::Resolved) => true,
            (ResolutionState::Resolving, ResolutionState::TimedOut) => true,
            // Forced reset after a missed deadline, or a retry
            (ResolutionState::TimedOut, ResolutionState::Resolved) => true,
            (ResolutionState::TimedOut, ResolutionState::Resolving) => true,
            // Periodic and on-demand re-validation
            (ResolutionState::Resolved, ResolutionState::Resolving) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            // Everything else is invalid; in particular Resolved ->
            // TimedOut, so a stale deadline never clobbers a decision
            _ => false,
        }
    }

    /// True while the UI should show its loading indicator.
    pub fn is_checking(&self) -> bool {
        matches!(self, ResolutionState::Unresolved | ResolutionState::Resolving)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, ResolutionState::Resolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionState::Unresolved => "unresolved",
            ResolutionState::Resolving => "resolving",
            ResolutionState::Resolved => "resolved",
            ResolutionState::TimedOut => "timed-out",
        }
    }
}

impl std::fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        // Unresolved -> Resolving
        assert!(ResolutionState::Unresolved.can_transition_to(ResolutionState::Resolving));
        // Resolving -> Resolved
        assert!(ResolutionState::Resolving.can_transition_to(ResolutionState::Resolved));
        // Resolving -> TimedOut
        assert!(ResolutionState::Resolving.can_transition_to(ResolutionState::TimedOut));
        // TimedOut -> Resolved (forced reset)
        assert!(ResolutionState::TimedOut.can_transition_to(ResolutionState::Resolved));
        // Resolved -> Resolving (re-validation)
        assert!(ResolutionState::Resolved.can_transition_to(ResolutionState::Resolving));
    }

    #[test]
    fn test_invalid_transitions() {
        // A stale deadline can't clobber a decision
        assert!(!ResolutionState::Resolved.can_transition_to(ResolutionState::TimedOut));
        // Nothing returns to Unresolved
        assert!(!ResolutionState::Resolved.can_transition_to(ResolutionState::Unresolved));
        assert!(!ResolutionState::Resolving.can_transition_to(ResolutionState::Unresolved));
        assert!(!ResolutionState::TimedOut.can_transition_to(ResolutionState::Unresolved));
    }

    #[test]
    fn test_is_checking() {
        assert!(ResolutionState::Unresolved.is_checking());
        assert!(ResolutionState::Resolving.is_checking());
        assert!(!ResolutionState::Resolved.is_checking());
        assert!(!ResolutionState::TimedOut.is_checking());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Registered, Role::Unregistered] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }

        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_authentication() {
        assert!(Role::Admin.is_authenticated());
        assert!(Role::Registered.is_authenticated());
        assert!(!Role::Unregistered.is_authenticated());
    }
}
