//! Notice data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    /// Unique identifier
    pub id: String,
    pub severity: Severity,
    /// Short headline shown to the user
    pub title: String,
    /// Supporting detail
    pub body: String,
    /// When the notice was emitted
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(severity: Severity, title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            severity,
            title,
            body,
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notice() {
        let notice = Notice::new(
            Severity::Success,
            "Logged out".to_string(),
            "You have been signed out".to_string(),
        );

        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.title, "Logged out");
        assert!(!notice.is_error());
        assert!(!notice.id.is_empty());
    }

    #[test]
    fn test_severity_round_trip() {
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
