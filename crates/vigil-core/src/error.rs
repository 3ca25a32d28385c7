//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Auth error: {0}")]
    Auth(#[from] vigil_auth::AuthError),

    #[error("API error: {0}")]
    Api(#[from] vigil_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}
