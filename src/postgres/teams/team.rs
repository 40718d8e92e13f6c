use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use super::membership::upsert_membership;
use crate::AuthError;
use crate::postgres::db_error;
use crate::teams::{CreateTeam, Team, TeamChanges, TeamRepository, TeamRole};

#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TeamRecord {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<TeamRecord> for Team {
    fn from(row: TeamRecord) -> Self {
        Team {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

async fn insert_team(conn: &mut PgConnection, data: CreateTeam) -> Result<Team, AuthError> {
    let row: TeamRecord = sqlx::query_as(
        r"
        INSERT INTO teams (id, name, description)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, created_at, updated_at, deleted_at
        ",
    )
    .bind(Uuid::new_v4())
    .bind(&data.name)
    .bind(&data.description)
    .fetch_one(&mut *conn)
    .await
    .map_err(db_error("create_team"))?;

    Ok(row.into())
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn create_with_manager(
        &self,
        data: CreateTeam,
        creator_id: Uuid,
    ) -> Result<Team, AuthError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin_create_team"))?;

        let result = async {
            let team = insert_team(&mut tx, data).await?;
            upsert_membership(&mut tx, team.id, creator_id, TeamRole::Manager).await?;
            Ok::<_, AuthError>(team)
        }
        .await;

        match result {
            Ok(team) => {
                tx.commit().await.map_err(db_error("commit_create_team"))?;
                Ok(team)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    log::error!(
                        target: "teamgate",
                        "msg=\"rollback failed\", operation=\"create_team\", error=\"{rollback}\""
                    );
                }
                Err(e)
            }
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_team(&self, id: Uuid) -> Result<Option<Team>, AuthError> {
        let row: Option<TeamRecord> = sqlx::query_as(
            r"
            SELECT id, name, description, created_at, updated_at, deleted_at
            FROM teams
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_team"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_teams(&self) -> Result<Vec<Team>, AuthError> {
        let rows: Vec<TeamRecord> = sqlx::query_as(
            r"
            SELECT id, name, description, created_at, updated_at, deleted_at
            FROM teams
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list_teams"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_teams_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AuthError> {
        let rows: Vec<TeamRecord> = sqlx::query_as(
            r"
            SELECT t.id, t.name, t.description, t.created_at, t.updated_at, t.deleted_at
            FROM teams t
            INNER JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1 AND m.deleted_at IS NULL AND t.deleted_at IS NULL
            ORDER BY t.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list_teams_for_user"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn update_team(&self, id: Uuid, changes: &TeamChanges) -> Result<Team, AuthError> {
        let row: TeamRecord = sqlx::query_as(
            r"
            UPDATE teams
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                updated_at = NOW()
            WHERE id = $3 AND deleted_at IS NULL
            RETURNING id, name, description, created_at, updated_at, deleted_at
            ",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("update_team"))?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn archive_team(&self, id: Uuid) -> Result<Team, AuthError> {
        let row: TeamRecord = sqlx::query_as(
            r"
            UPDATE teams
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, created_at, updated_at, deleted_at
            ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("archive_team"))?;

        Ok(row.into())
    }
}
