//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Sentinel subject id for sessions with no backend identity.
pub const GUEST_SUBJECT_ID: &str = "unregistered";

/// Resolved identity of the current browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    /// Backend identifier for the resolved role, or the guest sentinel
    pub subject_id: String,
    /// When this classification was made
    pub resolved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(role: Role, subject_id: String) -> Self {
        Self {
            role,
            subject_id,
            resolved_at: Utc::now(),
        }
    }

    /// Default identity when no backend identity is found.
    pub fn guest() -> Self {
        Self::new(Role::Unregistered, GUEST_SUBJECT_ID.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_registered(&self) -> bool {
        self.role == Role::Registered
    }

    /// True for any signed-in identity.
    pub fn is_authenticated(&self) -> bool {
        self.role.is_authenticated()
    }
}

/// Which login endpoint credentials are submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleHint {
    Admin,
    Registered,
}

/// Login form input.
///
/// Admins sign in with a username, registered users with an email;
/// `identity` carries whichever the hint selects.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identity: String,
    pub password: String,
}
