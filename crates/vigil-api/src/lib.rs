//! Vigil Auth Service Client
//!
//! Thin HTTP layer over the auth backend. Identity checks ride the
//! session cookie; logins are form posts that set it. This crate reports
//! failures faithfully — the fail-closed policy lives in the caller.

mod client;
mod error;
mod types;

pub use client::AuthApi;
pub use error::ApiError;
pub use types::{IdentityReply, NewUser, ServiceMessage};

pub type Result<T> = std::result::Result<T, ApiError>;
