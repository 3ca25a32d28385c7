//! Vigil Core
//!
//! Central wiring for the Vigil client: configuration, logging, the
//! session resolver and its consumers, and the periodic re-validation
//! loop. The `App` container owns every manager and hands out explicit
//! handles; nothing is reachable through a global.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::{Config, DEFAULT_AUTH_URL};
pub use error::CoreError;

// Re-export core components
pub use vigil_api::{ApiError, AuthApi, IdentityReply, NewUser};
pub use vigil_auth::{
    AuthError, Credentials, ResolutionState, Role, RoleHint, Session, SessionResolver,
    SessionView, GUEST_SUBJECT_ID,
};
pub use vigil_notify::{Notice, Notifier, Severity};
pub use vigil_routing::{
    home_target, nav_links, Access, NavLink, Requirement, RouteGuard, RouteRule,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
