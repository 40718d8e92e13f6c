use crate::teams::{Team, TeamRepository};
use crate::{AuthError, Identity};

/// Lists the teams visible to the actor, newest first.
///
/// Global admins see every active team; everyone else sees the teams they
/// belong to.
pub struct ListTeamsAction<T: TeamRepository> {
    team_repo: T,
}

impl<T: TeamRepository> ListTeamsAction<T> {
    pub fn new(team_repo: T) -> Self {
        Self { team_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "list_teams", skip_all, err)
    )]
    pub async fn execute(&self, actor: &Identity) -> Result<Vec<Team>, AuthError> {
        if actor.is_global_admin() {
            return self.team_repo.list_teams().await;
        }

        self.team_repo.list_teams_for_user(actor.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::actions::test_support::{admin, join, team, user};
    use crate::teams::{MockTeamStore, TeamRole};

    #[tokio::test]
    async fn test_admin_sees_all_newest_first() {
        let store = MockTeamStore::new();
        let admin = admin();
        let first = team(&store, "Alpha", &admin).await;
        let second = team(&store, "Beta", &admin).await;

        let teams = ListTeamsAction::new(store).execute(&admin).await.unwrap();

        let ids: Vec<_> = teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_member_sees_only_own_teams() {
        let store = MockTeamStore::new();
        let admin = admin();
        let member = user();
        let mine = team(&store, "Mine", &admin).await;
        team(&store, "Other", &admin).await;
        join(&store, &mine, &member, TeamRole::Member).await;

        let teams = ListTeamsAction::new(store).execute(&member).await.unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id, mine.id);
    }

    #[tokio::test]
    async fn test_no_memberships_is_empty() {
        let store = MockTeamStore::new();
        team(&store, "Eng", &admin()).await;

        let teams = ListTeamsAction::new(store).execute(&user()).await.unwrap();
        assert!(teams.is_empty());
    }

    #[tokio::test]
    async fn test_archived_and_removed_are_hidden() {
        let store = MockTeamStore::new();
        let admin = admin();
        let member = user();
        let archived = team(&store, "Old", &admin).await;
        let left = team(&store, "Left", &admin).await;
        join(&store, &archived, &member, TeamRole::Member).await;
        join(&store, &left, &member, TeamRole::Member).await;

        store.archive_team(archived.id).await.unwrap();
        crate::teams::TeamMembershipRepository::remove_membership(&store, left.id, member.user_id)
            .await
            .unwrap();

        let action = ListTeamsAction::new(store);
        assert!(action.execute(&member).await.unwrap().is_empty());
        assert_eq!(action.execute(&admin).await.unwrap().len(), 1);
    }
}
