use chrono::Utc;
use uuid::Uuid;

use crate::events::{TeamEvent, dispatch};
use crate::teams::{Team, TeamMembershipRepository, TeamRepository, can_manage};
use crate::{AuthError, Identity};

/// Soft-deletes a team. Archiving an archived team is `NotFound`.
pub struct ArchiveTeamAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> ArchiveTeamAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "archive_team", skip(self, actor), err)
    )]
    pub async fn execute(&self, actor: &Identity, team_id: Uuid) -> Result<Team, AuthError> {
        if !can_manage(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        let team = self.team_repo.archive_team(team_id).await?;

        log::info!(
            target: "teamgate",
            "msg=\"team archived\", team_id={}, archived_by={}",
            team.id,
            actor.user_id
        );

        dispatch(TeamEvent::TeamArchived {
            team_id: team.id,
            archived_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}
