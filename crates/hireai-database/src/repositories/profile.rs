//! Candidate and interviewer profile repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hireai_core::error::{AppError, ErrorKind};
use hireai_core::result::AppResult;
use hireai_entity::profile::{CandidateProfile, InterviewerProfile};

use crate::store::ProfileStore;

/// PostgreSQL-backed [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_from(&self, table: &'static str, user_id: Uuid) -> AppResult<bool> {
        let sql = format!("DELETE FROM {table} WHERE user_id = $1");
        sqlx::query(&sql)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to delete from {table}"),
                    e,
                )
            })
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn upsert_candidate(&self, user_id: Uuid) -> AppResult<CandidateProfile> {
        sqlx::query_as::<_, CandidateProfile>(
            r#"INSERT INTO candidate_profiles (id, user_id)
               VALUES ($1, $2)
               ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert candidate profile", e)
        })
    }

    async fn upsert_interviewer(
        &self,
        user_id: Uuid,
        company_name: Option<&str>,
    ) -> AppResult<InterviewerProfile> {
        sqlx::query_as::<_, InterviewerProfile>(
            r#"INSERT INTO interviewer_profiles (id, user_id, company_name)
               VALUES ($1, $2, $3)
               ON CONFLICT (user_id) DO UPDATE SET
                   company_name = COALESCE(EXCLUDED.company_name, interviewer_profiles.company_name),
                   updated_at = NOW()
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(company_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert interviewer profile", e)
        })
    }

    async fn find_candidate(&self, user_id: Uuid) -> AppResult<Option<CandidateProfile>> {
        sqlx::query_as::<_, CandidateProfile>(
            "SELECT * FROM candidate_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find candidate profile", e)
        })
    }

    async fn find_interviewer(&self, user_id: Uuid) -> AppResult<Option<InterviewerProfile>> {
        sqlx::query_as::<_, InterviewerProfile>(
            "SELECT * FROM interviewer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find interviewer profile", e)
        })
    }

    async fn delete_candidate(&self, user_id: Uuid) -> AppResult<bool> {
        self.delete_from("candidate_profiles", user_id).await
    }

    async fn delete_interviewer(&self, user_id: Uuid) -> AppResult<bool> {
        self.delete_from("interviewer_profiles", user_id).await
    }
}
