//! User identity types and the identity-provider interface.
//!
//! Sign-in itself is delegated to an external identity provider; this crate
//! only defines the contract and the profile-registration call made after a
//! successful signup.

pub mod profile;

pub use profile::ProfileClient;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identity fields of a signed-in user, as reported by the provider.
///
/// Field names follow the backend's JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "emailVerified", default)]
    pub email_verified: bool,
    #[serde(rename = "providerId", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

/// Contract for an external identity provider.
///
/// Async methods return boxed futures so the trait is dyn-compatible (can
/// be used as `Arc<dyn IdentityProvider>`). No implementation ships with
/// this crate; the provider is an external collaborator.
pub trait IdentityProvider: Send + Sync {
    /// Sign an existing user in.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Pin<Box<dyn Future<Output = Result<UserIdentity, Error>> + Send + '_>>;

    /// Create an account and sign it in.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Pin<Box<dyn Future<Output = Result<UserIdentity, Error>> + Send + '_>>;

    /// End the current session.
    fn sign_out(&self) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + '_>>;

    /// Trigger a password-reset flow for `email`.
    fn reset_password(
        &self,
        email: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + '_>>;
}
