//! In-process identity provider with a fixed token table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hireai_core::error::AppError;
use hireai_entity::identity::ExternalIdentity;

use super::provider::{IdentityProvider, VerifiedSession};

#[derive(Debug, Default)]
struct Tables {
    /// Bearer token -> external ID.
    sessions: HashMap<String, String>,
    /// External ID -> identity record.
    identities: HashMap<String, ExternalIdentity>,
}

/// [`IdentityProvider`] answering from registered tokens and identities.
///
/// Suitable for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tables: Arc<RwLock<Tables>>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identity` and accept `token` as a session for it.
    pub async fn sign_in(&self, token: impl Into<String>, identity: ExternalIdentity) {
        let mut tables = self.tables.write().await;
        tables.sessions.insert(token.into(), identity.id.clone());
        tables.identities.insert(identity.id.clone(), identity);
    }

    /// Replace the stored identity record.
    pub async fn put_identity(&self, identity: ExternalIdentity) {
        let mut tables = self.tables.write().await;
        tables.identities.insert(identity.id.clone(), identity);
    }

    /// Stop accepting `token`.
    pub async fn revoke(&self, token: &str) {
        self.tables.write().await.sessions.remove(token);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify_session_token(&self, token: &str) -> Result<VerifiedSession, AppError> {
        let tables = self.tables.read().await;
        tables
            .sessions
            .get(token)
            .map(|external_id| VerifiedSession {
                external_id: external_id.clone(),
                session_id: None,
            })
            .ok_or_else(|| AppError::unauthorized("Invalid session token"))
    }

    async fn fetch_identity(&self, external_id: &str) -> Result<ExternalIdentity, AppError> {
        let tables = self.tables.read().await;
        tables
            .identities
            .get(external_id)
            .cloned()
            .ok_or_else(|| AppError::unauthorized(format!("Identity '{external_id}' does not exist")))
    }
}
