//! Notification center
//!
//! The toast tray analog: a cloneable handle over a shared, bounded
//! queue of pending notices.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::notice::{Notice, Severity};

/// Maximum notices held before the oldest are dropped.
const MAX_PENDING: usize = 20;

pub struct Notifier {
    pending: Arc<RwLock<Vec<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn info(&self, title: &str, body: &str) -> Notice {
        self.push(Severity::Info, title, body)
    }

    pub fn success(&self, title: &str, body: &str) -> Notice {
        self.push(Severity::Success, title, body)
    }

    pub fn error(&self, title: &str, body: &str) -> Notice {
        self.push(Severity::Error, title, body)
    }

    fn push(&self, severity: Severity, title: &str, body: &str) -> Notice {
        let notice = Notice::new(severity, title.to_string(), body.to_string());

        match severity {
            Severity::Error => tracing::warn!(title = %title, body = %body, "Notice emitted"),
            _ => tracing::info!(title = %title, body = %body, "Notice emitted"),
        }

        let mut pending = self.pending.write();
        pending.push(notice.clone());

        if pending.len() > MAX_PENDING {
            let overflow = pending.len() - MAX_PENDING;
            pending.drain(0..overflow);
        }

        notice
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.pending.write().drain(..).collect()
    }

    /// Snapshot of pending notices without consuming them.
    pub fn pending(&self) -> Vec<Notice> {
        self.pending.read().clone()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.read().len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Notifier {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}
