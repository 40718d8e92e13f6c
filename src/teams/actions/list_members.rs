use uuid::Uuid;

use super::{find_active_team, require_id};
use crate::teams::{TeamMember, TeamMembershipRepository, TeamRepository, can_view};
use crate::{AuthError, Identity};

/// Lists active members, oldest membership first.
pub struct ListMembersAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> ListMembersAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_members", skip(self, actor), err)
    )]
    pub async fn execute(&self, actor: &Identity, team_id: Uuid) -> Result<Vec<TeamMember>, AuthError> {
        require_id(team_id, "team_id")?;
        find_active_team(&self.team_repo, team_id).await?;

        if !can_view(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        self.membership_repo.list_members(team_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::actions::test_support::{admin, join, team, user};
    use crate::teams::{MockTeamStore, TeamRole};
    use crate::{MockUserRepository, User};

    #[tokio::test]
    async fn test_members_joined_with_user_fields_in_join_order() {
        let users = MockUserRepository::new();
        let admin_user = users
            .insert(User::mock("Root", "root@example.com").with_role("admin"))
            .unwrap();
        let ada = users.insert(User::mock("Ada", "ada@example.com")).unwrap();
        let store = MockTeamStore::with_users(&users);

        let admin = Identity::from_user(&admin_user);
        let eng = team(&store, "Eng", &admin).await;
        join(&store, &eng, &Identity::from_user(&ada), TeamRole::Member).await;

        let members = ListMembersAction::new(store.clone(), store)
            .execute(&Identity::from_user(&ada), eng.id)
            .await
            .unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].user_id, admin_user.id);
        assert_eq!(members[0].role, TeamRole::Manager);
        assert_eq!(members[1].name, "Ada");
        assert_eq!(members[1].email, "ada@example.com");
        assert_eq!(members[1].role, TeamRole::Member);
    }

    #[tokio::test]
    async fn test_outsider_forbidden() {
        let store = MockTeamStore::new();
        let eng = team(&store, "Eng", &admin()).await;

        assert_eq!(
            ListMembersAction::new(store.clone(), store)
                .execute(&user(), eng.id)
                .await
                .unwrap_err(),
            AuthError::Forbidden
        );
    }

    #[tokio::test]
    async fn test_admin_bypasses_membership() {
        let store = MockTeamStore::new();
        let eng = team(&store, "Eng", &admin()).await;

        let members = ListMembersAction::new(store.clone(), store)
            .execute(&admin(), eng.id)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
    }
}
