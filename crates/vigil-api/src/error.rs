//! Auth API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid service URL: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::BadUrl(_) => "Invalid service address".to_string(),
            ApiError::Malformed(_) => "Unexpected server response".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for HTTP 401/403: the backend understood the request and
    /// said no.
    pub fn is_denied(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401 | 403, .. })
    }
}
