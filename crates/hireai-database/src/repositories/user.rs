//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hireai_core::error::{AppError, ErrorKind};
use hireai_core::result::AppResult;
use hireai_entity::user::{LocalUser, NewLocalUser, UserChanges};

use crate::store::UserStore;

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>> {
        sqlx::query_as::<_, LocalUser>("SELECT * FROM users WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by external id", e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>> {
        sqlx::query_as::<_, LocalUser>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn insert_if_absent(&self, user: NewLocalUser) -> AppResult<(LocalUser, bool)> {
        let inserted = sqlx::query_as::<_, LocalUser>(
            r#"INSERT INTO users (id, external_id, username, email, role)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (external_id) DO NOTHING
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&user.external_id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert user", e))?;

        if let Some(row) = inserted {
            return Ok((row, true));
        }

        // Lost the race; the winner's row is authoritative.
        let existing = self.find_by_external_id(&user.external_id).await?;
        existing.map(|row| (row, false)).ok_or_else(|| {
            AppError::conflict(format!(
                "User '{}' was removed while being created",
                user.external_id
            ))
        })
    }

    async fn apply_changes(&self, id: Uuid, changes: &UserChanges) -> AppResult<LocalUser> {
        sqlx::query_as::<_, LocalUser>(
            r#"UPDATE users SET
                   username = COALESCE($2, username),
                   email = COALESCE($3, email),
                   role = COALESCE($4, role),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<Option<LocalUser>> {
        sqlx::query_as::<_, LocalUser>("DELETE FROM users WHERE external_id = $1 RETURNING *")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
