//! The normalized user shape returned by the HTTP API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::LocalUser;
use super::role::UserRole;

/// Public view of a [`LocalUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub external_id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
}

impl From<&LocalUser> for UserView {
    fn from(user: &LocalUser) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<LocalUser> for UserView {
    fn from(user: LocalUser) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}
