use chrono::Utc;
use uuid::Uuid;

use super::find_active_team;
use crate::events::{TeamEvent, dispatch};
use crate::teams::{TeamMembership, TeamMembershipRepository, TeamRepository, can_manage};
use crate::{AuthError, Identity};

/// Soft-deletes a membership. Removing an already removed member is `NotFound`.
pub struct RemoveMemberAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> RemoveMemberAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip(self, actor), err)
    )]
    pub async fn execute(
        &self,
        actor: &Identity,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<TeamMembership, AuthError> {
        if !can_manage(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        find_active_team(&self.team_repo, team_id).await?;

        let membership = self
            .membership_repo
            .remove_membership(team_id, user_id)
            .await?;

        log::info!(
            target: "teamgate",
            "msg=\"member removed\", team_id={team_id}, user_id={user_id}, removed_by={}",
            actor.user_id
        );

        dispatch(TeamEvent::MemberRemoved {
            team_id,
            user_id,
            removed_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}
