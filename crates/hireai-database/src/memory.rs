//! In-memory stores for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use hireai_core::error::AppError;
use hireai_core::result::AppResult;
use hireai_entity::profile::{CandidateProfile, InterviewerProfile};
use hireai_entity::user::{LocalUser, NewLocalUser, UserChanges};

use crate::store::{ProfileStore, UserStore};

/// [`UserStore`] backed by a process-local map.
///
/// The write lock is held across the existence check and insert, which
/// gives `insert_if_absent` the same single-winner guarantee as the
/// database's unique constraint.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, LocalUser>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.external_id == external_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_if_absent(&self, user: NewLocalUser) -> AppResult<(LocalUser, bool)> {
        let mut users = self.users.write().await;

        if let Some(existing) = users.values().find(|u| u.external_id == user.external_id) {
            return Ok((existing.clone(), false));
        }

        let now = Utc::now();
        let row = LocalUser {
            id: Uuid::now_v7(),
            external_id: user.external_id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.insert(row.id, row.clone());
        Ok((row, true))
    }

    async fn apply_changes(&self, id: Uuid, changes: &UserChanges) -> AppResult<LocalUser> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        if let Some(username) = &changes.username {
            user.username = username.clone();
        }
        if let Some(email) = &changes.email {
            user.email = Some(email.clone());
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>> {
        let mut users = self.users.write().await;
        let id = users
            .values()
            .find(|u| u.external_id == external_id)
            .map(|u| u.id);
        Ok(id.and_then(|id| users.remove(&id)))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[derive(Debug, Default)]
struct ProfileTables {
    candidates: HashMap<Uuid, CandidateProfile>,
    interviewers: HashMap<Uuid, InterviewerProfile>,
}

/// [`ProfileStore`] backed by process-local maps keyed by user ID.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    tables: Arc<RwLock<ProfileTables>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored profiles of both kinds.
    pub async fn count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.candidates.len() + tables.interviewers.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn upsert_candidate(&self, user_id: Uuid) -> AppResult<CandidateProfile> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let profile = tables
            .candidates
            .entry(user_id)
            .and_modify(|p| p.updated_at = now)
            .or_insert_with(|| CandidateProfile {
                id: Uuid::now_v7(),
                user_id,
                resume_url: None,
                created_at: now,
                updated_at: now,
            });
        Ok(profile.clone())
    }

    async fn upsert_interviewer(
        &self,
        user_id: Uuid,
        company_name: Option<&str>,
    ) -> AppResult<InterviewerProfile> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let profile = tables
            .interviewers
            .entry(user_id)
            .and_modify(|p| {
                if let Some(company) = company_name {
                    p.company_name = Some(company.to_string());
                }
                p.updated_at = now;
            })
            .or_insert_with(|| InterviewerProfile {
                id: Uuid::now_v7(),
                user_id,
                company_name: company_name.map(str::to_string),
                created_at: now,
                updated_at: now,
            });
        Ok(profile.clone())
    }

    async fn find_candidate(&self, user_id: Uuid) -> AppResult<Option<CandidateProfile>> {
        Ok(self.tables.read().await.candidates.get(&user_id).cloned())
    }

    async fn find_interviewer(&self, user_id: Uuid) -> AppResult<Option<InterviewerProfile>> {
        Ok(self.tables.read().await.interviewers.get(&user_id).cloned())
    }

    async fn delete_candidate(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.candidates.remove(&user_id).is_some())
    }

    async fn delete_interviewer(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .interviewers
            .remove(&user_id)
            .is_some())
    }
}
