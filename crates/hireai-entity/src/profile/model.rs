//! Candidate and interviewer profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// Profile attached to a user in the `candidate` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    /// Profile identifier.
    pub id: Uuid,
    /// Owning local user. Unique.
    pub user_id: Uuid,
    /// Location of the uploaded resume, if any.
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile attached to a user in the `interviewer` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InterviewerProfile {
    /// Profile identifier.
    pub id: Uuid,
    /// Owning local user. Unique.
    pub user_id: Uuid,
    /// Company the interviewer hires for.
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Either profile kind, tagged by role in its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoleProfile {
    Candidate(CandidateProfile),
    Interviewer(InterviewerProfile),
}

impl RoleProfile {
    /// The role this profile belongs to.
    pub fn role(&self) -> UserRole {
        match self {
            Self::Candidate(_) => UserRole::Candidate,
            Self::Interviewer(_) => UserRole::Interviewer,
        }
    }

    /// The owning user's internal ID.
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Candidate(p) => p.user_id,
            Self::Interviewer(p) => p.user_id,
        }
    }
}
