//! Storage abstractions for local users and role profiles.

use async_trait::async_trait;
use uuid::Uuid;

use hireai_core::result::AppResult;
use hireai_entity::profile::{CandidateProfile, InterviewerProfile, RoleProfile};
use hireai_entity::user::{LocalUser, NewLocalUser, UserChanges, UserRole};

/// Persistence for [`LocalUser`] records.
///
/// Implementations must keep `external_id` unique under concurrent
/// writers: two racing `insert_if_absent` calls for the same external ID
/// must produce one row, with exactly one caller seeing `created = true`.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Look a user up by external identity ID.
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>>;

    /// Look a user up by internal ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>>;

    /// Insert a user unless one already exists for the external ID.
    ///
    /// Returns the stored row and whether this call created it.
    async fn insert_if_absent(&self, user: NewLocalUser) -> AppResult<(LocalUser, bool)>;

    /// Write the `Some` fields of `changes` and bump `updated_at`.
    async fn apply_changes(&self, id: Uuid, changes: &UserChanges) -> AppResult<LocalUser>;

    /// Delete a user by external ID, returning the removed row if any.
    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>>;

    /// Check backend connectivity.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Persistence for role profiles, at most one of each kind per user.
#[async_trait]
pub trait ProfileStore: Send + Sync + std::fmt::Debug {
    /// Create the candidate profile if absent, else touch it.
    async fn upsert_candidate(&self, user_id: Uuid) -> AppResult<CandidateProfile>;

    /// Create or update the interviewer profile. A `None` company keeps
    /// whatever is already stored.
    async fn upsert_interviewer(
        &self,
        user_id: Uuid,
        company_name: Option<&str>,
    ) -> AppResult<InterviewerProfile>;

    async fn find_candidate(&self, user_id: Uuid) -> AppResult<Option<CandidateProfile>>;

    async fn find_interviewer(&self, user_id: Uuid) -> AppResult<Option<InterviewerProfile>>;

    /// Returns `true` if a profile was removed.
    async fn delete_candidate(&self, user_id: Uuid) -> AppResult<bool>;

    /// Returns `true` if a profile was removed.
    async fn delete_interviewer(&self, user_id: Uuid) -> AppResult<bool>;

    /// The profile matching the user's current role, if provisioned.
    async fn find_for(&self, user: &LocalUser) -> AppResult<Option<RoleProfile>> {
        Ok(match user.role {
            UserRole::Candidate => self
                .find_candidate(user.id)
                .await?
                .map(RoleProfile::Candidate),
            UserRole::Interviewer => self
                .find_interviewer(user.id)
                .await?
                .map(RoleProfile::Interviewer),
        })
    }
}
