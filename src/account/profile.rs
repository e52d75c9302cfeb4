//! Backend profile registration.

use reqwest::header::CONTENT_TYPE;
use tracing::warn;

use super::UserIdentity;
use crate::error::{Error, Result};
use crate::net::HttpClient;

/// Client for the backend profile API.
///
/// Used once per signup to notify the backend of the new user's identity
/// fields. A failure here is non-fatal to the signup flow by contract; use
/// [`notify_signup_logged`](Self::notify_signup_logged) when the caller
/// only wants the warning.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: HttpClient,
    base_url: String,
}

impl ProfileClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, HttpClient::new())
    }

    pub fn with_http(base_url: impl Into<String>, http: HttpClient) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register a signed-up user's profile with the backend.
    pub async fn notify_signup(&self, user: &UserIdentity) -> Result<()> {
        let url = format!("{}/user/signup", self.base_url);

        let response = self
            .http
            .inner()
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// [`notify_signup`](Self::notify_signup), but failures are only
    /// logged. Signup proceeds either way.
    pub async fn notify_signup_logged(&self, user: &UserIdentity) {
        if let Err(e) = self.notify_signup(user).await {
            warn!(uid = %user.uid, error = %e, "profile registration failed");
        }
    }
}
