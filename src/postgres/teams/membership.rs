use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::AuthError;
use crate::postgres::db_error;
use crate::teams::{TeamMember, TeamMembership, TeamMembershipRepository, TeamRole};

#[derive(Clone)]
pub struct PostgresTeamMembershipRepository {
    pool: PgPool,
}

impl PostgresTeamMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MembershipRecord {
    id: Uuid,
    team_id: Uuid,
    user_id: Uuid,
    role: String,
    is_manager: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<MembershipRecord> for TeamMembership {
    fn from(row: MembershipRecord) -> Self {
        TeamMembership {
            id: row.id,
            team_id: row.team_id,
            user_id: row.user_id,
            role: TeamRole::resolve(&row.role, row.is_manager),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(FromRow)]
struct MemberRecord {
    membership_id: Uuid,
    user_id: Uuid,
    name: String,
    email: String,
    role: String,
    is_manager: bool,
    joined_at: DateTime<Utc>,
}

impl From<MemberRecord> for TeamMember {
    fn from(row: MemberRecord) -> Self {
        TeamMember {
            membership_id: row.membership_id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            role: TeamRole::resolve(&row.role, row.is_manager),
            joined_at: row.joined_at,
        }
    }
}

/// Inserts the pair or reactivates the existing row, on any connection.
///
/// The manager flag is always written from the role. A soft-deleted user
/// still satisfies the foreign key, so the insert is guarded on an active
/// user row and fails with `AuthError::NotFound` otherwise.
pub(super) async fn upsert_membership(
    conn: &mut PgConnection,
    team_id: Uuid,
    user_id: Uuid,
    role: TeamRole,
) -> Result<TeamMembership, AuthError> {
    let row: Option<MembershipRecord> = sqlx::query_as(
        r"
        INSERT INTO team_members (id, team_id, user_id, role, is_manager)
        SELECT $1, $2, $3, $4, $5
        WHERE EXISTS (SELECT 1 FROM users WHERE id = $3 AND deleted_at IS NULL)
        ON CONFLICT (team_id, user_id) DO UPDATE
        SET role = EXCLUDED.role,
            is_manager = EXCLUDED.is_manager,
            deleted_at = NULL,
            updated_at = NOW()
        RETURNING id, team_id, user_id, role, is_manager, created_at, updated_at, deleted_at
        ",
    )
    .bind(Uuid::new_v4())
    .bind(team_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(role.is_manager_tier())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("upsert_membership"))?;

    row.map(Into::into).ok_or(AuthError::NotFound)
}

#[async_trait]
impl TeamMembershipRepository for PostgresTeamMembershipRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMembership>, AuthError> {
        let row: Option<MembershipRecord> = sqlx::query_as(
            r"
            SELECT id, team_id, user_id, role, is_manager, created_at, updated_at, deleted_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_membership"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn upsert_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMembership, AuthError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("acquire_connection"))?;

        upsert_membership(&mut conn, team_id, user_id, role).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn update_membership_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMembership>, AuthError> {
        let row: Option<MembershipRecord> = sqlx::query_as(
            r"
            UPDATE team_members
            SET role = $3, is_manager = $4, updated_at = NOW()
            WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING id, team_id, user_id, role, is_manager, created_at, updated_at, deleted_at
            ",
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role.as_str())
        .bind(role.is_manager_tier())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update_membership_role"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn remove_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<TeamMembership, AuthError> {
        let row: MembershipRecord = sqlx::query_as(
            r"
            UPDATE team_members
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE team_id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING id, team_id, user_id, role, is_manager, created_at, updated_at, deleted_at
            ",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("remove_membership"))?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AuthError> {
        let rows: Vec<MemberRecord> = sqlx::query_as(
            r"
            SELECT m.id AS membership_id, m.user_id, u.name, u.email,
                   m.role, m.is_manager, m.created_at AS joined_at
            FROM team_members m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.team_id = $1 AND m.deleted_at IS NULL
            ORDER BY m.created_at ASC
            ",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list_members"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
