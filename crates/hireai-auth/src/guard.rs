//! Bearer credential verification with lazy local user creation.

use std::sync::Arc;

use tracing::{debug, info};

use hireai_core::error::AppError;
use hireai_database::store::UserStore;
use hireai_entity::user::LocalUser;

use crate::idp::{IdentityProvider, VerifiedSession};
use crate::reconcile::UserReconciler;

/// A request's verified identity and its local user.
#[derive(Debug, Clone)]
pub struct GuardedIdentity {
    pub session: VerifiedSession,
    pub user: LocalUser,
    /// `true` if no local user existed when the request arrived.
    pub created: bool,
}

/// Resolves an external bearer token to a [`LocalUser`].
///
/// A verified identity with no local user is the expected outcome of the
/// `user.created` webhook not having landed yet. The guard then creates the
/// user through the reconciler, so both paths produce identical state.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    identity_provider: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserStore>,
    reconciler: UserReconciler,
}

impl SessionGuard {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserStore>,
        reconciler: UserReconciler,
    ) -> Self {
        Self {
            identity_provider,
            users,
            reconciler,
        }
    }

    /// Verify `bearer` and return its local user, creating it if needed.
    ///
    /// Missing or invalid credentials fail with `Unauthorized` before any
    /// storage is touched.
    pub async fn resolve(&self, bearer: Option<&str>) -> Result<GuardedIdentity, AppError> {
        let token = bearer
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

        let session = self.identity_provider.verify_session_token(token).await?;

        if let Some(user) = self.users.find_by_external_id(&session.external_id).await? {
            debug!(user_id = %user.id, external_id = %session.external_id, "Session resolved");
            return Ok(GuardedIdentity {
                session,
                user,
                created: false,
            });
        }

        info!(
            external_id = %session.external_id,
            "No local user for verified identity; creating ahead of webhook"
        );
        let identity = self
            .identity_provider
            .fetch_identity(&session.external_id)
            .await?;
        let user = self.reconciler.ensure_user(&identity).await?;

        Ok(GuardedIdentity {
            session,
            user,
            created: true,
        })
    }
}
