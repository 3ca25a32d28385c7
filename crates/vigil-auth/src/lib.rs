//! Vigil Session Role Resolution
//!
//! The client's answer to "who is using this browser session": admin,
//! registered user, or anonymous guest. Resolution probes the backend
//! identity endpoints in priority order, fails closed on every error,
//! and always terminates in a decided state within a bounded deadline.

mod error;
mod resolver;
mod role;
mod session;

pub use error::AuthError;
pub use resolver::{RoleProbe, SessionResolver, SessionView};
pub use role::{ResolutionState, Role};
pub use session::{Credentials, RoleHint, Session, GUEST_SUBJECT_ID};

pub type Result<T> = std::result::Result<T, AuthError>;
