//! Team lifecycle and membership actions.
//!
//! Every action takes the calling [`Identity`](crate::Identity) and consults
//! [`can_manage`](super::can_manage) or [`can_view`](super::can_view) before
//! touching storage.

mod add_member;
mod archive_team;
mod change_member_role;
mod create_team;
mod get_team;
mod list_members;
mod list_teams;
mod remove_member;
mod update_team;

pub use add_member::AddMemberAction;
pub use archive_team::ArchiveTeamAction;
pub use change_member_role::ChangeMemberRoleAction;
pub use create_team::{CreateTeamAction, CreateTeamInput};
pub use get_team::GetTeamAction;
pub use list_members::ListMembersAction;
pub use list_teams::ListTeamsAction;
pub use remove_member::RemoveMemberAction;
pub use update_team::{UpdateTeamAction, UpdateTeamInput};

use uuid::Uuid;

use super::{Team, TeamRepository};
use crate::{AuthError, ValidationError};

fn require_id(id: Uuid, field: &'static str) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::IdMissing(field));
    }
    Ok(())
}

async fn find_active_team<T: TeamRepository>(teams: &T, team_id: Uuid) -> Result<Team, AuthError> {
    teams.find_team(team_id).await?.ok_or(AuthError::NotFound)
}

#[cfg(test)]
pub(crate) mod test_support {
    use uuid::Uuid;

    use crate::teams::{CreateTeam, MockTeamStore, Team, TeamMembershipRepository, TeamRepository, TeamRole};
    use crate::Identity;

    pub fn admin() -> Identity {
        Identity::new(Uuid::new_v4(), "admin@example.com", Some("admin".into()))
    }

    pub fn user() -> Identity {
        Identity::new(Uuid::new_v4(), "user@example.com", None)
    }

    pub async fn team(store: &MockTeamStore, name: &str, creator: &Identity) -> Team {
        store
            .create_with_manager(
                CreateTeam {
                    name: name.to_owned(),
                    description: None,
                },
                creator.user_id,
            )
            .await
            .unwrap()
    }

    pub async fn join(store: &MockTeamStore, team: &Team, who: &Identity, role: TeamRole) {
        store
            .upsert_membership(team.id, who.user_id, role)
            .await
            .unwrap();
    }
}
