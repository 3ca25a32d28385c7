//! Auth error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend rejected the submitted credentials or sign-up form.
    #[error("{0}")]
    Rejected(String),

    #[error("Auth service error: {0}")]
    Service(#[from] vigil_api::ApiError),
}

impl AuthError {
    pub(crate) fn from_api(err: vigil_api::ApiError) -> Self {
        match err {
            vigil_api::ApiError::Rejected { message, .. } => AuthError::Rejected(message),
            other => AuthError::Service(other),
        }
    }
}
