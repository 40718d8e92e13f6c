//! `PostgreSQL` repositories built on `sqlx`.
//!
//! Expected tables: `users`, `teams` and `team_members`, each with a
//! nullable `deleted_at`, and a unique constraint on
//! `team_members (team_id, user_id)`.

mod teams;
mod user;

pub use teams::{PostgresTeamMembershipRepository, PostgresTeamRepository};
pub use user::PostgresUserRepository;

use sqlx::PgPool;

use crate::AuthError;

/// Creates every Postgres repository from one shared pool.
pub fn create_repositories(
    pool: PgPool,
) -> (
    PostgresUserRepository,
    PostgresTeamRepository,
    PostgresTeamMembershipRepository,
) {
    (
        PostgresUserRepository::new(pool.clone()),
        PostgresTeamRepository::new(pool.clone()),
        PostgresTeamMembershipRepository::new(pool),
    )
}

/// Maps a `sqlx` error into the crate error, logging anything unexpected.
///
/// Missing rows become `NotFound`, unique violations `Conflict` and
/// foreign-key violations `NotFound`.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AuthError {
    move |e| match &e {
        sqlx::Error::RowNotFound => AuthError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            log::warn!(target: "teamgate", "msg=\"unique violation\", operation=\"{operation}\", error=\"{e}\"");
            AuthError::Conflict(format!("{operation}: duplicate record"))
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            log::warn!(target: "teamgate", "msg=\"foreign key violation\", operation=\"{operation}\", error=\"{e}\"");
            AuthError::NotFound
        }
        _ => {
            log::error!(target: "teamgate", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        }
    }
}
