//! Seams to the identity provider's client SDK and to navigation.

use async_trait::async_trait;

use hireai_core::error::AppError;
use hireai_entity::identity::{ExternalIdentity, Metadata};

/// The identity provider's client-side session.
#[async_trait]
pub trait ExternalSession: Send + Sync {
    /// Whether the provider currently reports a signed-in user.
    async fn is_signed_in(&self) -> bool;

    /// A fresh bearer token for the backend, if one can be issued.
    async fn session_token(&self) -> Result<Option<String>, AppError>;

    /// The signed-in user's identity record, metadata included.
    async fn identity(&self) -> Option<ExternalIdentity>;

    /// Replace the holder-writable (low-trust) metadata.
    async fn update_unsafe_metadata(&self, metadata: Metadata) -> Result<(), AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}

/// Moves the user interface between views.
pub trait Navigator: Send + Sync {
    /// Replace the current view with the anonymous landing view.
    fn go_to_landing(&self);
}
