//! Idempotent reconciliation of identity events onto local users.
//!
//! Delivery is at-least-once and unordered, so every operation here is an
//! upsert keyed by external ID: replaying an event, or seeing `updated`
//! before `created`, converges to the same stored state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use hireai_core::error::AppError;
use hireai_database::store::UserStore;
use hireai_entity::identity::{EventKind, ExternalIdentity, WebhookEvent};
use hireai_entity::profile::RoleProfile;
use hireai_entity::user::{LocalUser, NewLocalUser, UserRole};

use super::provisioner::ProfileProvisioner;

/// What reconciling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created(LocalUser),
    Updated(LocalUser),
    /// The event matched stored state; nothing was written.
    Unchanged(LocalUser),
    Deleted(LocalUser),
    /// Nothing to act on: unknown event type or an already-deleted user.
    Skipped,
}

impl ReconcileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Unchanged(_) => "unchanged",
            Self::Deleted(_) => "deleted",
            Self::Skipped => "skipped",
        }
    }

    pub fn user(&self) -> Option<&LocalUser> {
        match self {
            Self::Created(u) | Self::Updated(u) | Self::Unchanged(u) | Self::Deleted(u) => Some(u),
            Self::Skipped => None,
        }
    }
}

/// Explicit registration from the client's own sign-up flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub external_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub company_name: Option<String>,
}

/// Applies external identity state to local storage.
#[derive(Debug, Clone)]
pub struct UserReconciler {
    users: Arc<dyn UserStore>,
    provisioner: ProfileProvisioner,
}

impl UserReconciler {
    pub fn new(users: Arc<dyn UserStore>, provisioner: ProfileProvisioner) -> Self {
        Self { users, provisioner }
    }

    /// Dispatch a verified webhook event.
    pub async fn apply(&self, event: &WebhookEvent) -> Result<ReconcileOutcome, AppError> {
        let outcome = match event.kind() {
            EventKind::Created => self.on_created(&event.identity()?).await?,
            EventKind::Updated => self.on_updated(&event.identity()?).await?,
            EventKind::Deleted => self.on_deleted(&event.subject_id()?).await?,
            EventKind::Other => {
                debug!(event_type = %event.event_type, "Ignoring unhandled identity event");
                ReconcileOutcome::Skipped
            }
        };

        info!(
            event_type = %event.event_type,
            outcome = outcome.label(),
            user_id = ?outcome.user().map(|u| u.id),
            "Identity event reconciled"
        );
        Ok(outcome)
    }

    /// `user.created`: create unless the user already exists.
    ///
    /// A duplicate still fills in a missing profile, so a redelivery after a
    /// failed provisioning step converges.
    pub async fn on_created(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, AppError> {
        if let Some(existing) = self.users.find_by_external_id(&identity.id).await? {
            info!(
                external_id = %identity.id,
                user_id = %existing.id,
                "User already exists; treating created event as duplicate"
            );
            return self.settle_existing(existing, identity).await;
        }

        let (user, created) = self.create_from(identity).await?;
        if created {
            return Ok(ReconcileOutcome::Created(user));
        }
        self.settle_existing(user, identity).await
    }

    async fn settle_existing(
        &self,
        user: LocalUser,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, AppError> {
        match self
            .provisioner
            .ensure(&user, identity.declared_company_name())
            .await?
        {
            Some(_) => Ok(ReconcileOutcome::Updated(user)),
            None => Ok(ReconcileOutcome::Unchanged(user)),
        }
    }

    /// `user.updated`: merge changed fields, creating the user if this is
    /// the first event seen for it.
    pub async fn on_updated(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, AppError> {
        let Some(user) = self.users.find_by_external_id(&identity.id).await? else {
            info!(
                external_id = %identity.id,
                "Update for unknown user; creating from event"
            );
            return self.on_created(identity).await;
        };

        let changes = user.diff(
            identity.declared_username(),
            identity.primary_email(),
            identity.declared_role(),
        );
        let company = identity.declared_company_name();

        let user = if changes.is_empty() {
            user
        } else {
            self.users.apply_changes(user.id, &changes).await?
        };

        let reprovisioned = if changes.role.is_some() {
            Some(self.provisioner.provision(&user, user.role, company).await?)
        } else {
            self.provisioner.ensure(&user, company).await?
        };

        if changes.is_empty() && reprovisioned.is_none() {
            return Ok(ReconcileOutcome::Unchanged(user));
        }
        Ok(ReconcileOutcome::Updated(user))
    }

    /// `user.deleted`: remove profiles, then the user. Unknown IDs are a no-op.
    pub async fn on_deleted(&self, external_id: &str) -> Result<ReconcileOutcome, AppError> {
        let Some(user) = self.users.find_by_external_id(external_id).await? else {
            debug!(external_id = %external_id, "Delete for unknown user; nothing to do");
            return Ok(ReconcileOutcome::Skipped);
        };

        self.provisioner.remove_all(user.id).await?;

        match self.users.delete_by_external_id(external_id).await? {
            Some(deleted) => Ok(ReconcileOutcome::Deleted(deleted)),
            None => Ok(ReconcileOutcome::Skipped),
        }
    }

    /// Find or create the local user for a verified identity.
    ///
    /// Used by the session guard when a signed-in user arrives before the
    /// provider's `user.created` webhook. Creation follows the same rules as
    /// [`on_created`](Self::on_created) so either path can win the race.
    pub async fn ensure_user(&self, identity: &ExternalIdentity) -> Result<LocalUser, AppError> {
        let user = match self.users.find_by_external_id(&identity.id).await? {
            Some(existing) => existing,
            None => {
                let (user, created) = self.create_from(identity).await?;
                if created {
                    return Ok(user);
                }
                user
            }
        };
        self.provisioner
            .ensure(&user, identity.declared_company_name())
            .await?;
        Ok(user)
    }

    /// Create or update a user from an explicit registration request.
    ///
    /// Only the provided fields are written to an existing user.
    pub async fn register(
        &self,
        registration: Registration,
    ) -> Result<(LocalUser, Option<RoleProfile>), AppError> {
        if registration.external_id.trim().is_empty() {
            return Err(AppError::validation("external_id is required"));
        }

        let name = registration.name.as_deref().filter(|n| !n.trim().is_empty());
        let email = registration.email.as_deref().filter(|e| !e.trim().is_empty());

        let existing = self
            .users
            .find_by_external_id(&registration.external_id)
            .await?;

        let user = match existing {
            Some(user) => self.merge(user, name, email, registration.role).await?,
            None => {
                let username = name
                    .or_else(|| email.and_then(|e| e.split('@').next()))
                    .filter(|u| !u.is_empty())
                    .unwrap_or(registration.external_id.as_str())
                    .to_string();
                let (user, created) = self
                    .users
                    .insert_if_absent(NewLocalUser {
                        external_id: registration.external_id.clone(),
                        username,
                        email: email.map(str::to_string),
                        role: registration.role.unwrap_or_default(),
                    })
                    .await?;
                if created {
                    info!(user_id = %user.id, external_id = %user.external_id, "User registered");
                    user
                } else {
                    self.merge(user, name, email, registration.role).await?
                }
            }
        };

        self.provisioner
            .ensure(&user, registration.company_name.as_deref())
            .await?;
        let profile = self.provisioner.current(&user).await?;
        Ok((user, profile))
    }

    async fn merge(
        &self,
        user: LocalUser,
        username: Option<&str>,
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> Result<LocalUser, AppError> {
        let changes = user.diff(username, email, role);
        if changes.is_empty() {
            return Ok(user);
        }
        self.users.apply_changes(user.id, &changes).await
    }

    /// Insert from identity fields and provision when this call created the row.
    async fn create_from(&self, identity: &ExternalIdentity) -> Result<(LocalUser, bool), AppError> {
        let role = identity.role_sources().resolve();
        let new_user = NewLocalUser {
            external_id: identity.id.clone(),
            username: identity.derived_username(),
            email: identity.primary_email().map(str::to_string),
            role,
        };

        let (user, created) = self.users.insert_if_absent(new_user).await?;
        if !created {
            debug!(
                external_id = %identity.id,
                user_id = %user.id,
                "User created concurrently by another path"
            );
            return Ok((user, false));
        }

        info!(
            user_id = %user.id,
            external_id = %user.external_id,
            role = %user.role,
            "Local user created"
        );

        if let Err(e) = self
            .provisioner
            .provision(&user, role, identity.declared_company_name())
            .await
        {
            warn!(
                user_id = %user.id,
                error = %e,
                "Profile provisioning failed after user creation"
            );
            return Err(e);
        }

        Ok((user, true))
    }
}
