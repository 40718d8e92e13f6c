use chrono::Utc;
use uuid::Uuid;

use super::{find_active_team, require_id};
use crate::events::{TeamEvent, dispatch};
use crate::teams::{TeamMembership, TeamMembershipRepository, TeamRepository, TeamRole, can_manage};
use crate::{AuthError, Identity};

/// Adds a user to a team, or reactivates their removed membership.
pub struct AddMemberAction<T: TeamRepository, M: TeamMembershipRepository> {
    team_repo: T,
    membership_repo: M,
}

impl<T: TeamRepository, M: TeamMembershipRepository> AddMemberAction<T, M> {
    pub fn new(team_repo: T, membership_repo: M) -> Self {
        Self {
            team_repo,
            membership_repo,
        }
    }

    /// A missing or blank `role` defaults to [`TeamRole::Member`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_member", skip(self, actor), err)
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
        let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
            Some(role) => TeamRole::parse(role)?,
            None => TeamRole::default(),
        };

        if !can_manage(&self.membership_repo, actor, team_id).await? {
            return Err(AuthError::Forbidden);
        }

        find_active_team(&self.team_repo, team_id).await?;

        let membership = self
            .membership_repo
            .upsert_membership(team_id, user_id, role)
            .await?;

        log::info!(
            target: "teamgate",
            "msg=\"member added\", team_id={team_id}, user_id={user_id}, role={role}, added_by={}",
            actor.user_id
        );

        dispatch(TeamEvent::MemberAdded {
            team_id,
            user_id,
            role,
            added_by: actor.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::actions::test_support::{admin, join, team, user};
    use crate::teams::MockTeamStore;
    use crate::ValidationError;

    fn action(store: &MockTeamStore) -> AddMemberAction<MockTeamStore, MockTeamStore> {
        AddMemberAction::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_role_defaults_to_member() {
        let store = MockTeamStore::new();
        let admin = admin();
        let eng = team(&store, "Eng", &admin).await;
        let target = Uuid::new_v4();

        let membership = action(&store)
            .execute(&admin, eng.id, target, None)
            .await
            .unwrap();
        assert_eq!(membership.role, TeamRole::Member);
        assert!(!membership.is_manager());
    }

    #[tokio::test]
    async fn test_role_case_insensitive_and_validated() {
        let store = MockTeamStore::new();
        let admin = admin();
        let eng = team(&store, "Eng", &admin).await;

        let membership = action(&store)
            .execute(&admin, eng.id, Uuid::new_v4(), Some("MANAGER"))
            .await
            .unwrap();
        assert_eq!(membership.role, TeamRole::Manager);
        assert!(membership.is_manager());

        assert_eq!(
            action(&store)
                .execute(&admin, eng.id, Uuid::new_v4(), Some("owner"))
                .await
                .unwrap_err(),
            AuthError::Validation(ValidationError::InvalidRole)
        );
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MockTeamStore::new();
        let admin = admin();

        assert_eq!(
            action(&store)
                .execute(&admin, Uuid::nil(), Uuid::new_v4(), None)
                .await
                .unwrap_err(),
            AuthError::Validation(ValidationError::IdMissing("team_id"))
        );
        assert_eq!(
            action(&store)
                .execute(&admin, Uuid::new_v4(), Uuid::nil(), None)
                .await
                .unwrap_err(),
            AuthError::Validation(ValidationError::IdMissing("user_id"))
        );
    }

    #[tokio::test]
    async fn test_member_cannot_add() {
        let store = MockTeamStore::new();
        let member = user();
        let eng = team(&store, "Eng", &admin()).await;
        join(&store, &eng, &member, TeamRole::Member).await;

        assert_eq!(
            action(&store)
                .execute(&member, eng.id, Uuid::new_v4(), None)
                .await
                .unwrap_err(),
            AuthError::Forbidden
        );
    }

    #[tokio::test]
    async fn test_archived_team_not_found() {
        let store = MockTeamStore::new();
        let admin = admin();
        let eng = team(&store, "Eng", &admin).await;
        store.archive_team(eng.id).await.unwrap();

        assert_eq!(
            action(&store)
                .execute(&admin, eng.id, Uuid::new_v4(), None)
                .await
                .unwrap_err(),
            AuthError::NotFound
        );
    }

    #[tokio::test]
    async fn test_readd_reactivates_single_row() {
        let store = MockTeamStore::new();
        let admin = admin();
        let eng = team(&store, "Eng", &admin).await;
        let target = Uuid::new_v4();

        action(&store)
            .execute(&admin, eng.id, target, Some("manager"))
            .await
            .unwrap();
        store.remove_membership(eng.id, target).await.unwrap();
        let again = action(&store)
            .execute(&admin, eng.id, target, Some("member"))
            .await
            .unwrap();

        assert_eq!(again.role, TeamRole::Member);
        assert_eq!(store.membership_rows(eng.id, target).unwrap().len(), 1);
    }
}
