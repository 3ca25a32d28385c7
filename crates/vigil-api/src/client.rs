//! Auth service HTTP client

use std::time::Duration;
use url::Url;

use crate::error::ApiError;
use crate::types::{IdentityReply, NewUser, ServiceMessage};
use crate::Result;

#[derive(Debug)]
pub struct AuthApi {
    http: reqwest::Client,
    base: Url,
}

impl AuthApi {
    /// Build a client for the auth service at `base_url`.
    ///
    /// The cookie store carries the backend session between calls; every
    /// request issued through this client shares it.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    // === Identity checks ===

    pub async fn identify_admin(&self) -> Result<IdentityReply> {
        self.fetch_identity("identifyAdmin").await
    }

    pub async fn identify_registered(&self) -> Result<IdentityReply> {
        self.fetch_identity("identifyRegisteredUser").await
    }

    /// Also ensures the anonymous-visitor cookie exists.
    pub async fn identify_guest(&self) -> Result<IdentityReply> {
        self.fetch_identity("identify").await
    }

    async fn fetch_identity(&self, path: &str) -> Result<IdentityReply> {
        let response = self.http.get(self.endpoint(path)).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // === Login / logout ===

    /// Admins sign in with a username.
    pub async fn login_admin(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("loginAdmin"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        expect_success(response).await
    }

    /// Registered users sign in with an email.
    pub async fn login_registered(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("loginRegisteredUser"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        expect_success(response).await
    }

    pub async fn create_registered_user(&self, profile: &NewUser) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("createRegisteredUser"))
            .form(profile)
            .send()
            .await?;

        expect_success(response).await
    }

    pub async fn logout(&self) -> Result<()> {
        let response = self.http.post(self.endpoint("logout")).send().await?;
        expect_success(response).await
    }
}

impl Clone for AuthApi {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base: self.base.clone(),
        }
    }
}

async fn expect_success(response: reqwest::Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(rejection(response).await)
    }
}

/// Recover the user-facing message from a non-2xx reply body when the
/// backend sent one.
async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "Auth service rejected request");
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ServiceMessage>(&body).ok())
        .and_then(|reply| reply.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request rejected")
                .to_string()
        });

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn api(base: &str) -> AuthApi {
        AuthApi::new(base, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_identify_admin_parses_reply() {
        let router = Router::new().route(
            "/identifyAdmin",
            get(|| async { Json(json!({"status": "true", "admin_user_id": "a7"})) }),
        );
        let base = serve(router).await;

        let reply = api(&base).identify_admin().await.unwrap();
        assert!(reply.is_positive());
        assert_eq!(reply.subject_id(), Some("a7"));
    }

    #[tokio::test]
    async fn test_rejection_carries_backend_message() {
        let router = Router::new().route(
            "/loginAdmin",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "Invalid credentials"})),
                )
            }),
        );
        let base = serve(router).await;

        let err = api(&base).login_admin("root", "nope").await.unwrap_err();
        assert!(err.is_denied());
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("Expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_status_reason() {
        let router = Router::new().route("/logout", post(|| async { StatusCode::FORBIDDEN }));
        let base = serve(router).await;

        let err = api(&base).logout().await.unwrap_err();
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("Expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_identity_body_is_an_error() {
        let router = Router::new().route("/identify", get(|| async { "not json" }));
        let base = serve(router).await;

        let err = api(&base).identify_guest().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let err = AuthApi::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::BadUrl(_)));
    }
}
