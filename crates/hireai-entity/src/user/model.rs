//! Local user entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// The locally owned mirror of an external identity.
///
/// Exactly one row exists per `external_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LocalUser {
    /// Internal identifier; session tokens bind to this.
    pub id: Uuid,
    /// Stable identifier assigned by the identity provider. Immutable.
    pub external_id: String,
    /// Display username.
    pub username: String,
    /// Email address, if the identity has one.
    pub email: Option<String>,
    /// Account role; never null.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl LocalUser {
    /// Compute the set of changes needed to bring this record in line with
    /// the observed fields. `None` inputs are left untouched.
    pub fn diff(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> UserChanges {
        UserChanges {
            username: username
                .filter(|u| *u != self.username)
                .map(str::to_string),
            email: email
                .filter(|e| self.email.as_deref() != Some(*e))
                .map(str::to_string),
            role: role.filter(|r| *r != self.role),
        }
    }
}

/// Data required to create a new local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLocalUser {
    /// External identity ID.
    pub external_id: String,
    /// Display username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Initial role.
    pub role: UserRole,
}

/// A partial update; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

impl UserChanges {
    /// Returns `true` if nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }
}
