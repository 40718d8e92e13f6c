use chrono::Utc;
use serde::Deserialize;

use crate::events::{TeamEvent, dispatch};
use crate::teams::{CreateTeam, Team, TeamRepository};
use crate::validators::validate_team_name;
use crate::{AuthError, Identity};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates a team and makes its creator a manager of it.
///
/// Only global admins may create teams. The team row and the creator's
/// membership are written in a single transaction.
pub struct CreateTeamAction<T: TeamRepository> {
    team_repo: T,
}

impl<T: TeamRepository> CreateTeamAction<T> {
    pub fn new(team_repo: T) -> Self {
        Self { team_repo }
    }

    /// # Returns
    ///
    /// - `Err(AuthError::Unauthenticated)` - no actor
    /// - `Err(AuthError::Forbidden)` - actor is not a global admin
    /// - `Err(AuthError::Validation(_))` - name shorter than 2 characters after trimming
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_team", skip_all, err)
    )]
    pub async fn execute(
        &self,
        actor: Option<&Identity>,
        input: CreateTeamInput,
    ) -> Result<Team, AuthError> {
        let actor = actor.ok_or(AuthError::Unauthenticated)?;
        if !actor.is_global_admin() {
            return Err(AuthError::Forbidden);
        }

        let name = validate_team_name(&input.name)?;

        let team = self
            .team_repo
            .create_with_manager(
                CreateTeam {
                    name,
                    description: input.description,
                },
                actor.user_id,
            )
            .await?;

        log::info!(
            target: "teamgate",
            "msg=\"team created\", team_id={}, created_by={}",
            team.id,
            actor.user_id
        );

        dispatch(TeamEvent::TeamCreated {
            team_id: team.id,
            created_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}
