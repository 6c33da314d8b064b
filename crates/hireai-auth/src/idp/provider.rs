//! Identity provider trait.

use async_trait::async_trait;

use hireai_core::error::AppError;
use hireai_entity::identity::ExternalIdentity;

/// A session token the provider has vouched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    /// External identity ID (the token subject).
    pub external_id: String,
    /// Provider session ID, when the token carries one.
    pub session_id: Option<String>,
}

/// What the backend needs from the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Verify a bearer session token issued by the provider.
    ///
    /// Invalid, expired or foreign tokens yield an `Unauthorized` error.
    async fn verify_session_token(&self, token: &str) -> Result<VerifiedSession, AppError>;

    /// Fetch the current identity record.
    async fn fetch_identity(&self, external_id: &str) -> Result<ExternalIdentity, AppError>;
}
