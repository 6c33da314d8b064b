//! Response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hireai_entity::profile::RoleProfile;
use hireai_entity::user::UserView;

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
    /// Present only when the login fell inside the cooldown window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

/// POST /api/auth/logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    pub logout_time: DateTime<Utc>,
}

/// GET /api/auth/me
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserView,
}

/// POST /api/users and GET /api/users/me
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserView,
    pub profile: Option<RoleProfile>,
}

/// POST /api/webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: String,
}

/// GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
