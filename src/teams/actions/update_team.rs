use chrono::Utc;
use uuid::Uuid;

use crate::events::{TeamEvent, dispatch};
use crate::teams::{Team, TeamChanges, TeamMembershipRepository, TeamRepository, can_manage};
use crate::validators::validate_team_name;
use crate::{AuthError, Identity, ValidationError};

/// Partial update. A field that is `None` is left unchanged; an empty
/// description clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdateTeamAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> UpdateTeamAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    /// Applies every valid field. Fails with a validation error only when no
    /// field is valid to apply.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_team", skip(self, actor, input), err)
    )]
    pub async fn execute(
        &self,
        actor: &Identity,
        team_id: Uuid,
        input: UpdateTeamInput,
    ) -> Result<Team, AuthError> {
        if !can_manage(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        let changes = applicable_changes(input)?;
        let team = self.team_repo.update_team(team_id, &changes).await?;

        log::info!(
            target: "teamgate",
            "msg=\"team updated\", team_id={}, updated_by={}",
            team.id,
            actor.user_id
        );

        dispatch(TeamEvent::TeamUpdated {
            team_id: team.id,
            updated_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}

fn applicable_changes(input: UpdateTeamInput) -> Result<TeamChanges, ValidationError> {
    let mut name_error = None;
    let name = match input.name.as_deref().map(validate_team_name) {
        Some(Ok(name)) => Some(name),
        Some(Err(e)) => {
            name_error = Some(e);
            None
        }
        None => None,
    };

    let changes = TeamChanges {
        name,
        description: input.description,
    };

    if changes.is_empty() {
        return Err(name_error.unwrap_or(ValidationError::NothingToUpdate));
    }

    Ok(changes)
}
