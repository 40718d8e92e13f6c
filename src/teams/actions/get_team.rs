use uuid::Uuid;

use super::{find_active_team, require_id};
use crate::teams::{Team, TeamMembershipRepository, TeamRepository, can_view};
use crate::{AuthError, Identity};

pub struct GetTeamAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> GetTeamAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    /// Archived teams are `NotFound` for every caller, admins included.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_team", skip(self, actor), err)
    )]
    pub async fn execute(&self, actor: &Identity, team_id: Uuid) -> Result<Team, AuthError> {
        require_id(team_id, "team_id")?;

        let team = find_active_team(&self.team_repo, team_id).await?;

        if !can_view(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        Ok(team)
    }
}
