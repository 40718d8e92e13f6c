use chrono::Utc;
use uuid::Uuid;

use super::{find_active_team, require_id};
use crate::events::{TeamEvent, dispatch};
use crate::teams::{TeamMembership, TeamMembershipRepository, TeamRepository, TeamRole, can_manage};
use crate::{AuthError, Identity, ValidationError};

/// Sets a member's role, adding the user to the team if they hold no active
/// membership.
pub struct ChangeMemberRoleAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> ChangeMemberRoleAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_member_role", skip(self, actor), err)
    )]
    pub async fn execute(
        &self,
        actor: &Identity,
        team_id: Uuid,
        user_id: Uuid,
        role: Option<&str>,
    ) -> Result<TeamMembership, AuthError> {
        require_id(team_id, "team_id")?;
        require_id(user_id, "user_id")?;
        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ValidationError::RoleMissing)?;
        let role = TeamRole::parse(role)?;

        if !can_manage(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        find_active_team(&self.team_repo, team_id).await?;

        let membership = match self
            .membership_repo
            .update_membership_role(team_id, user_id, role)
            .await?
        {
            Some(membership) => membership,
            None => {
                log::debug!(
                    target: "teamgate",
                    "msg=\"no active membership, adding\", team_id={team_id}, user_id={user_id}"
                );
                self.membership_repo
                    .upsert_membership(team_id, user_id, role)
                    .await?
            }
        };

        log::info!(
            target: "teamgate",
            "msg=\"member role changed\", team_id={team_id}, user_id={user_id}, role={role}, changed_by={}",
            actor.user_id
        );

        dispatch(TeamEvent::MemberRoleChanged {
            team_id,
            user_id,
            role,
            changed_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}
