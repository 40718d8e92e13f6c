use async_trait::async_trait;
use uuid::Uuid;

use super::types::{Team, TeamMember, TeamMembership};
use super::TeamRole;
use crate::AuthError;

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub name: String,
    pub description: Option<String>,
}

/// Fields to overwrite on a team. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TeamChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Team storage. Soft-deleted teams are invisible to every method.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Inserts the team and upserts `creator_id` as a manager in one transaction.
    async fn create_with_manager(
        &self,
        data: CreateTeam,
        creator_id: Uuid,
    ) -> Result<Team, AuthError>;
    async fn find_team(&self, id: Uuid) -> Result<Option<Team>, AuthError>;
    /// All active teams, newest first.
    async fn list_teams(&self) -> Result<Vec<Team>, AuthError>;
    /// Active teams the user holds an active membership in, newest first.
    async fn list_teams_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AuthError>;
    /// Fails with `AuthError::NotFound` if the team is absent or archived.
    async fn update_team(&self, id: Uuid, changes: &TeamChanges) -> Result<Team, AuthError>;
    /// Stamps `deleted_at`. Fails with `AuthError::NotFound` if already archived.
    async fn archive_team(&self, id: Uuid) -> Result<Team, AuthError>;
}

/// Membership storage keyed on the unique `(team_id, user_id)` pair.
#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    async fn find_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMembership>, AuthError>;

    /// Inserts the pair, or reactivates and re-roles an existing row.
    async fn upsert_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMembership, AuthError>;

    /// Changes the role of the active row. `None` when the pair has no active row.
    async fn update_membership_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMembership>, AuthError>;

    /// Fails with `AuthError::NotFound` when the pair has no active row.
    async fn remove_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<TeamMembership, AuthError>;

    /// Active members with their user's name and email, oldest membership first.
    async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AuthError>;
}
