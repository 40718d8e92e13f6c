use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::db_error;
use crate::identity::GLOBAL_ADMIN_ROLE;
use crate::{AuthError, User, UserRepository};

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    hashed_password: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            hashed_password: row.hashed_password,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

const FIRST_ADMIN_LOCK: &str = "teamgate.grant_first_admin";

const USER_COLUMNS: &str =
    "id, name, email, hashed_password, role, created_at, updated_at, deleted_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_user_by_id"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_user_by_email"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, hashed_password), err))]
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AuthError> {
        let row: UserRecord = sqlx::query_as(&format!(
            "INSERT INTO users (id, name, email, hashed_password) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create_user"))
        .map_err(|e| match e {
            AuthError::Conflict(_) => AuthError::UserAlreadyExists,
            other => other,
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn set_global_role(
        &self,
        user_id: Uuid,
        role: Option<&str>,
    ) -> Result<User, AuthError> {
        let row: UserRecord = sqlx::query_as(&format!(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 AND deleted_at IS NULL RETURNING {USER_COLUMNS}"
        ))
        .bind(role)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("set_global_role"))?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn count_admins(&self) -> Result<i64, AuthError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE LOWER(role) = $1 AND deleted_at IS NULL",
        )
        .bind(GLOBAL_ADMIN_ROLE)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("count_admins"))
    }

    /// Serialized by a transaction-scoped advisory lock so two concurrent
    /// bootstraps cannot both observe zero admins.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn grant_first_admin(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin_grant_first_admin"))?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(FIRST_ADMIN_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(db_error("lock_grant_first_admin"))?;

        let row: Option<UserRecord> = sqlx::query_as(&format!(
            r"
            UPDATE users SET role = $1, updated_at = NOW()
            WHERE id = $2 AND deleted_at IS NULL
              AND NOT EXISTS (
                SELECT 1 FROM users WHERE LOWER(role) = $1 AND deleted_at IS NULL
              )
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(GLOBAL_ADMIN_ROLE)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("grant_first_admin"))?;

        tx.commit()
            .await
            .map_err(db_error("commit_grant_first_admin"))?;

        Ok(row.map(Into::into))
    }
}
