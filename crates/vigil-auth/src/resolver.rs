//! Session role resolver
//!
//! Probes the backend identity endpoints in priority order (admin before
//! registered before guest fallback) and commits the outcome to shared
//! state. Every probe fails closed. The whole pass runs under a deadline
//! that cancels in-flight requests, and each pass carries a ticket so a
//! stale completion can never overwrite a fresher one.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use vigil_api::AuthApi;
use vigil_notify::Notifier;

use crate::error::AuthError;
use crate::role::{ResolutionState, Role};
use crate::session::{Credentials, RoleHint, Session};
use crate::Result;

/// Outcome of one identity probe.
#[derive(Debug, Clone)]
pub struct RoleProbe {
    pub matched: bool,
    pub subject_id: Option<String>,
}

impl RoleProbe {
    fn negative() -> Self {
        Self {
            matched: false,
            subject_id: None,
        }
    }
}

/// Read-side snapshot handed to route guards and the navbar.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session: Option<Session>,
    pub resolution: ResolutionState,
}

impl SessionView {
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some(Role::Admin))
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.role(), Some(Role::Registered))
    }

    pub fn is_authenticated(&self) -> bool {
        self.role().is_some_and(|r| r.is_authenticated())
    }

    pub fn is_checking(&self) -> bool {
        self.resolution.is_checking()
    }
}

struct ResolverState {
    session: Option<Session>,
    resolution: ResolutionState,
}

pub struct SessionResolver {
    api: AuthApi,
    notifier: Notifier,
    /// Deadline for one full resolution pass
    resolve_timeout: Duration,
    /// Shared session state; this resolver is its only writer
    state: Arc<RwLock<ResolverState>>,
    /// Latest issued resolution ticket; only it may commit
    ticket: Arc<AtomicU64>,
}

impl SessionResolver {
    pub fn new(api: AuthApi, notifier: Notifier, resolve_timeout: Duration) -> Self {
        Self {
            api,
            notifier,
            resolve_timeout,
            state: Arc::new(RwLock::new(ResolverState {
                session: None,
                resolution: ResolutionState::Unresolved,
            })),
            ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    // === Read side ===

    pub fn view(&self) -> SessionView {
        let state = self.state.read();
        SessionView {
            session: state.session.clone(),
            resolution: state.resolution,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.read().session.clone()
    }

    pub fn resolution(&self) -> ResolutionState {
        self.state.read().resolution
    }

    pub fn is_checking(&self) -> bool {
        self.resolution().is_checking()
    }

    // === Probes ===

    /// Identity check against the admin endpoint.
    ///
    /// Any failure — non-2xx, transport, malformed body — is "not
    /// admin"; this never errors.
    pub async fn probe_admin(&self) -> RoleProbe {
        match self.api.identify_admin().await {
            Ok(reply) if reply.is_positive() => RoleProbe {
                matched: true,
                subject_id: reply.admin_user_id.clone(),
            },
            Ok(_) => RoleProbe::negative(),
            Err(e) => {
                tracing::debug!(error = %e, "Admin identity probe failed");
                RoleProbe::negative()
            }
        }
    }

    /// Same contract as [`probe_admin`](Self::probe_admin) for the
    /// registered-user endpoint.
    pub async fn probe_registered(&self) -> RoleProbe {
        match self.api.identify_registered().await {
            Ok(reply) if reply.is_positive() => RoleProbe {
                matched: true,
                subject_id: reply.reg_user_id.clone(),
            },
            Ok(_) => RoleProbe::negative(),
            Err(e) => {
                tracing::debug!(error = %e, "Registered identity probe failed");
                RoleProbe::negative()
            }
        }
    }

    /// Guest fallback. Also ensures the anonymous-visitor cookie; a
    /// failure here still matches, with the sentinel subject id.
    pub async fn probe_guest(&self) -> RoleProbe {
        match self.api.identify_guest().await {
            Ok(reply) => RoleProbe {
                matched: true,
                subject_id: reply.unreg_user_id.clone(),
            },
            Err(e) => {
                tracing::debug!(error = %e, "Guest identity probe failed");
                RoleProbe {
                    matched: true,
                    subject_id: None,
                }
            }
        }
    }

    // === Resolution ===

    /// Classify the current session by ordered probes.
    ///
    /// Runs under the configured deadline; on expiry the pass is marked
    /// timed out and force-reset to a resolved guest, so callers always
    /// get a decided session back. Dropping the probe future on expiry
    /// aborts the underlying requests.
    pub async fn resolve(&self) -> Session {
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.start_resolving(ticket);

        match tokio::time::timeout(self.resolve_timeout, self.classify()).await {
            Ok(session) => {
                if self.commit(ticket, session.clone()) {
                    tracing::info!(
                        role = %session.role,
                        subject_id = %session.subject_id,
                        "Session resolved"
                    );
                    session
                } else {
                    tracing::debug!(ticket, "Discarded stale resolution");
                    self.current().unwrap_or_else(Session::guest)
                }
            }
            Err(_) => {
                tracing::warn!(
                    ticket,
                    timeout_ms = self.resolve_timeout.as_millis() as u64,
                    "Session resolution exceeded its deadline"
                );
                if self.mark_timed_out(ticket) {
                    self.notifier
                        .error("Session check timed out", "Continuing as a guest");
                    self.reset()
                } else {
                    self.current().unwrap_or_else(Session::guest)
                }
            }
        }
    }

    /// Ordered probe sequence: admin, then registered, then guest.
    ///
    /// Admin runs first so an admin account can never be mis-classified
    /// as a plain registered user; the first positive match wins.
    async fn classify(&self) -> Session {
        let admin = self.probe_admin().await;
        if admin.matched {
            return Session::new(
                Role::Admin,
                admin
                    .subject_id
                    .unwrap_or_else(|| Role::Admin.as_str().to_string()),
            );
        }

        let registered = self.probe_registered().await;
        if registered.matched {
            return Session::new(
                Role::Registered,
                registered
                    .subject_id
                    .unwrap_or_else(|| Role::Registered.as_str().to_string()),
            );
        }

        let guest = self.probe_guest().await;
        match guest.subject_id {
            Some(id) => Session::new(Role::Unregistered, id),
            None => Session::guest(),
        }
    }

    // === Actions ===

    /// Submit credentials to the endpoint selected by `hint`.
    ///
    /// Success refreshes the session via [`resolve`](Self::resolve);
    /// failure surfaces a notice and leaves session state untouched.
    pub async fn login(&self, credentials: &Credentials, hint: RoleHint) -> Result<Session> {
        let outcome = match hint {
            RoleHint::Admin => {
                self.api
                    .login_admin(&credentials.identity, &credentials.password)
                    .await
            }
            RoleHint::Registered => {
                self.api
                    .login_registered(&credentials.identity, &credentials.password)
                    .await
            }
        };

        match outcome {
            Ok(()) => {
                let session = self.resolve().await;
                let body = match hint {
                    RoleHint::Admin => "Welcome to the admin panel",
                    RoleHint::Registered => "Welcome back",
                };
                self.notifier.success("Login successful", body);
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, hint = ?hint, "Login failed");
                self.notifier.error("Login failed", &e.user_message());
                Err(AuthError::from_api(e))
            }
        }
    }

    /// Create a registered-user account. Never mutates session state.
    pub async fn register(&self, profile: &vigil_api::NewUser) -> Result<()> {
        match self.api.create_registered_user(profile).await {
            Ok(()) => {
                self.notifier.success("Account created", "You can now sign in");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                self.notifier.error("Registration failed", &e.user_message());
                Err(AuthError::from_api(e))
            }
        }
    }

    /// Log out, then clear local state to a guest regardless of whether
    /// the backend call succeeded.
    pub async fn logout(&self) -> Session {
        match self.api.logout().await {
            Ok(()) => {
                self.notifier
                    .success("Logged out", "You have been signed out");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed");
                self.notifier
                    .error("Logout failed", "Your local session was still cleared");
            }
        }

        self.reset()
    }

    /// Forced local reset to the guest identity.
    ///
    /// Synchronous; also invalidates any in-flight resolution so a late
    /// probe result cannot overwrite it.
    pub fn reset(&self) -> Session {
        self.ticket.fetch_add(1, Ordering::SeqCst);

        let session = Session::guest();
        {
            let mut state = self.state.write();
            state.resolution = ResolutionState::Resolved;
            state.session = Some(session.clone());
        }

        tracing::info!("Session reset to guest");

        session
    }

    // === Internal transitions ===

    fn start_resolving(&self, ticket: u64) {
        let mut state = self.state.write();
        if state.resolution.can_transition_to(ResolutionState::Resolving) {
            state.resolution = ResolutionState::Resolving;
            tracing::debug!(ticket, "Session resolution started");
        }
    }

    /// Commit a decided session if `ticket` is still the latest.
    fn commit(&self, ticket: u64, session: Session) -> bool {
        let mut state = self.state.write();
        if self.ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        if !state.resolution.can_transition_to(ResolutionState::Resolved) {
            return false;
        }

        state.resolution = ResolutionState::Resolved;
        state.session = Some(session);
        true
    }

    fn mark_timed_out(&self, ticket: u64) -> bool {
        let mut state = self.state.write();
        if self.ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        if !state.resolution.can_transition_to(ResolutionState::TimedOut) {
            return false;
        }

        state.resolution = ResolutionState::TimedOut;
        true
    }
}

impl Clone for SessionResolver {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: self.notifier.clone(),
            resolve_timeout: self.resolve_timeout,
            state: Arc::clone(&self.state),
            ticket: Arc::clone(&self.ticket),
        }
    }
}
