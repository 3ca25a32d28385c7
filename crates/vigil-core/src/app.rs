//! Application container
//!
//! Owns every manager and hands explicit clones to consumers at
//! construction time.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

use vigil_api::AuthApi;
use vigil_auth::{Credentials, RoleHint, Session, SessionResolver, SessionView};
use vigil_notify::Notifier;
use vigil_routing::{Access, NavLink, RouteGuard};

use crate::config::Config;
use crate::Result;

pub struct App {
    config: Config,
    notifier: Notifier,
    resolver: SessionResolver,
    guard: RouteGuard,
    /// Shutdown handle for the periodic re-validation task
    revalidation: Arc<RwLock<Option<watch::Sender<()>>>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = AuthApi::new(&config.auth_base_url, config.request_timeout)?;
        let notifier = Notifier::new();
        let resolver = SessionResolver::new(api, notifier.clone(), config.resolve_timeout);

        Ok(Self {
            config,
            notifier,
            resolver,
            guard: RouteGuard::standard(),
            revalidation: Arc::new(RwLock::new(None)),
        })
    }

    /// Resolve the session once and start periodic re-validation.
    pub async fn initialize(&self) -> Session {
        let session = self.resolver.resolve().await;
        self.start_revalidation();

        tracing::info!(role = %session.role, "Application initialized");

        session
    }

    /// Spawn the re-validation task. Idempotent.
    fn start_revalidation(&self) {
        let mut slot = self.revalidation.write();
        if slot.is_some() {
            return;
        }

        let (tx, mut rx) = watch::channel(());
        let resolver = self.resolver.clone();
        let period = self.config.revalidate_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; initialize() has already
            // resolved once
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = rx.changed() => {
                        tracing::debug!("Re-validation task stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        resolver.resolve().await;
                    }
                }
            }
        });

        *slot = Some(tx);
    }

    /// Stop the re-validation task.
    pub fn shutdown(&self) {
        if let Some(tx) = self.revalidation.write().take() {
            let _ = tx.send(());
            tracing::info!("Application shut down");
        }
    }

    // === Session operations ===

    pub async fn check_auth(&self) -> Session {
        self.resolver.resolve().await
    }

    pub async fn login(&self, credentials: &Credentials, hint: RoleHint) -> Result<Session> {
        Ok(self.resolver.login(credentials, hint).await?)
    }

    pub async fn register(&self, profile: &vigil_api::NewUser) -> Result<()> {
        Ok(self.resolver.register(profile).await?)
    }

    pub async fn logout(&self) -> Session {
        self.resolver.logout().await
    }

    pub fn session_view(&self) -> SessionView {
        self.resolver.view()
    }

    // === Navigation operations ===

    pub fn decide(&self, path: &str) -> Access {
        self.guard.decide(path, &self.resolver.view())
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        vigil_routing::nav_links(&self.resolver.view())
    }

    // === Accessors ===

    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            notifier: self.notifier.clone(),
            resolver: self.resolver.clone(),
            guard: self.guard.clone(),
            revalidation: Arc::clone(&self.revalidation),
        }
    }
}
