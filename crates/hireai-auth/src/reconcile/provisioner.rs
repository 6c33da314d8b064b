//! Role profile provisioning.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use hireai_core::error::AppError;
use hireai_database::store::ProfileStore;
use hireai_entity::profile::RoleProfile;
use hireai_entity::user::{LocalUser, UserRole};

/// Ensures a user has the profile record matching their role.
///
/// Profiles of the other kind are never removed here; a user switching
/// from candidate to interviewer keeps the old candidate profile.
#[derive(Debug, Clone)]
pub struct ProfileProvisioner {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileProvisioner {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Upsert the profile for `role`, keyed by the user's internal ID.
    pub async fn provision(
        &self,
        user: &LocalUser,
        role: UserRole,
        company_name: Option<&str>,
    ) -> Result<RoleProfile, AppError> {
        let profile = match role {
            UserRole::Candidate => {
                RoleProfile::Candidate(self.profiles.upsert_candidate(user.id).await?)
            }
            UserRole::Interviewer => RoleProfile::Interviewer(
                self.profiles
                    .upsert_interviewer(user.id, company_name)
                    .await?,
            ),
        };

        info!(
            user_id = %user.id,
            external_id = %user.external_id,
            role = %role,
            company = company_name.unwrap_or(""),
            "Role profile provisioned"
        );
        Ok(profile)
    }

    /// Provision only when the user's current-role profile is missing or
    /// carries a different company than the one declared.
    ///
    /// Returns the profile when a write happened.
    pub async fn ensure(
        &self,
        user: &LocalUser,
        company_name: Option<&str>,
    ) -> Result<Option<RoleProfile>, AppError> {
        let up_to_date = match user.role {
            UserRole::Candidate => self.profiles.find_candidate(user.id).await?.is_some(),
            UserRole::Interviewer => match self.profiles.find_interviewer(user.id).await? {
                Some(existing) => {
                    company_name.is_none() || existing.company_name.as_deref() == company_name
                }
                None => false,
            },
        };

        if up_to_date {
            debug!(user_id = %user.id, role = %user.role, "Role profile already current");
            return Ok(None);
        }

        self.provision(user, user.role, company_name).await.map(Some)
    }

    /// The profile matching the user's current role, if any.
    pub async fn current(&self, user: &LocalUser) -> Result<Option<RoleProfile>, AppError> {
        self.profiles.find_for(user).await
    }

    /// Delete both profile kinds for a user. Missing profiles are fine.
    pub async fn remove_all(&self, user_id: Uuid) -> Result<(), AppError> {
        let candidate = self.profiles.delete_candidate(user_id).await?;
        let interviewer = self.profiles.delete_interviewer(user_id).await?;
        debug!(
            user_id = %user_id,
            candidate_removed = candidate,
            interviewer_removed = interviewer,
            "Role profiles removed"
        );
        Ok(())
    }
}
