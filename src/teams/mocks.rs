#![allow(clippy::significant_drop_tightening)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::repository::{CreateTeam, TeamChanges, TeamMembershipRepository, TeamRepository};
use super::types::{Team, TeamMember, TeamMembership};
use super::TeamRole;
use crate::{AuthError, MockUserRepository, SoftDelete, User};

#[derive(Default)]
struct State {
    teams: Vec<Team>,
    memberships: Vec<TeamMembership>,
}

impl State {
    fn upsert(&mut self, team_id: Uuid, user_id: Uuid, role: TeamRole) -> TeamMembership {
        let now = Utc::now();

        if let Some(existing) = self
            .memberships
            .iter_mut()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
        {
            existing.role = role;
            existing.deleted_at = None;
            existing.updated_at = now;
            return existing.clone();
        }

        let membership = TeamMembership {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.memberships.push(membership.clone());
        membership
    }

    fn active_team_mut(&mut self, id: Uuid) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id && t.is_active())
    }
}

/// In-memory team and membership store.
///
/// Implements both [`TeamRepository`] and [`TeamMembershipRepository`] over
/// one lock, so multi-row writes are atomic the way a transaction would be.
/// Clones share state.
#[derive(Clone, Default)]
pub struct MockTeamStore {
    state: Arc<RwLock<State>>,
    users: Option<Arc<Mutex<Vec<User>>>>,
    lookups: Arc<AtomicUsize>,
    fail_membership_writes: Arc<AtomicBool>,
}

impl MockTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins member listings against the given users and rejects unknown users.
    pub fn with_users(users: &MockUserRepository) -> Self {
        Self {
            users: Some(Arc::clone(&users.users)),
            ..Self::default()
        }
    }

    /// Number of membership lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Makes every membership write fail with a conflict, for rollback tests.
    pub fn fail_membership_writes(&self, fail: bool) {
        self.fail_membership_writes.store(fail, Ordering::SeqCst);
    }

    /// Every membership row for the pair, active or not.
    pub fn membership_rows(&self, team_id: Uuid, user_id: Uuid) -> Result<Vec<TeamMembership>, AuthError> {
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.team_id == team_id && m.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Number of team rows, archived ones included.
    pub fn team_count(&self) -> Result<usize, AuthError> {
        Ok(self.read()?.teams.len())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, AuthError> {
        self.state
            .read()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, AuthError> {
        self.state
            .write()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))
    }

    fn check_membership_write(&self, user_id: Uuid) -> Result<(), AuthError> {
        if self.fail_membership_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Conflict("membership write rejected".into()));
        }

        if let Some(user) = self.find_user(user_id)? {
            if !user.is_active() {
                return Err(AuthError::NotFound);
            }
        } else if self.users.is_some() {
            return Err(AuthError::NotFound);
        }

        Ok(())
    }

    fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        let Some(users) = &self.users else {
            return Ok(None);
        };
        let users = users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }
}

fn newest_first(mut teams: Vec<Team>) -> Vec<Team> {
    // later inserts win ties
    teams.reverse();
    teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    teams
}

#[async_trait]
impl TeamRepository for MockTeamStore {
    async fn create_with_manager(
        &self,
        data: CreateTeam,
        creator_id: Uuid,
    ) -> Result<Team, AuthError> {
        self.check_membership_write(creator_id)?;

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let mut state = self.write()?;
        state.teams.push(team.clone());
        state.upsert(team.id, creator_id, TeamRole::Manager);

        Ok(team)
    }

    async fn find_team(&self, id: Uuid) -> Result<Option<Team>, AuthError> {
        let state = self.read()?;
        Ok(state
            .teams
            .iter()
            .find(|t| t.id == id && t.is_active())
            .cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, AuthError> {
        let state = self.read()?;
        Ok(newest_first(
            state.teams.iter().filter(|t| t.is_active()).cloned().collect(),
        ))
    }

    async fn list_teams_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AuthError> {
        let state = self.read()?;
        let teams = state
            .teams
            .iter()
            .filter(|t| t.is_active())
            .filter(|t| {
                state
                    .memberships
                    .iter()
                    .any(|m| m.team_id == t.id && m.user_id == user_id && m.is_active())
            })
            .cloned()
            .collect();
        Ok(newest_first(teams))
    }

    async fn update_team(&self, id: Uuid, changes: &TeamChanges) -> Result<Team, AuthError> {
        let mut state = self.write()?;
        let team = state.active_team_mut(id).ok_or(AuthError::NotFound)?;

        if let Some(name) = &changes.name {
            name.clone_into(&mut team.name);
        }
        if let Some(description) = &changes.description {
            team.description = Some(description.clone());
        }
        team.updated_at = Utc::now();

        Ok(team.clone())
    }

    async fn archive_team(&self, id: Uuid) -> Result<Team, AuthError> {
        let mut state = self.write()?;
        let team = state.active_team_mut(id).ok_or(AuthError::NotFound)?;

        let now = Utc::now();
        team.deleted_at = Some(now);
        team.updated_at = now;

        Ok(team.clone())
    }
}

#[async_trait]
impl TeamMembershipRepository for MockTeamStore {
    async fn find_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMembership>, AuthError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.read()?;
        Ok(state
            .memberships
            .iter()
            .find(|m| m.team_id == team_id && m.user_id == user_id && m.is_active())
            .cloned())
    }

    async fn upsert_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMembership, AuthError> {
        self.check_membership_write(user_id)?;
        let mut state = self.write()?;
        Ok(state.upsert(team_id, user_id, role))
    }

    async fn update_membership_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMembership>, AuthError> {
        let mut state = self.write()?;
        let Some(membership) = state
            .memberships
            .iter_mut()
            .find(|m| m.team_id == team_id && m.user_id == user_id && m.is_active())
        else {
            return Ok(None);
        };

        membership.role = role;
        membership.updated_at = Utc::now();

        Ok(Some(membership.clone()))
    }

    async fn remove_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<TeamMembership, AuthError> {
        let mut state = self.write()?;
        let membership = state
            .memberships
            .iter_mut()
            .find(|m| m.team_id == team_id && m.user_id == user_id && m.is_active())
            .ok_or(AuthError::NotFound)?;

        let now = Utc::now();
        membership.deleted_at = Some(now);
        membership.updated_at = now;

        Ok(membership.clone())
    }

    async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AuthError> {
        let mut active: Vec<TeamMembership> = {
            let state = self.read()?;
            state
                .memberships
                .iter()
                .filter(|m| m.team_id == team_id && m.is_active())
                .cloned()
                .collect()
        };
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut members = Vec::with_capacity(active.len());
        for membership in active {
            let user = self.find_user(membership.user_id)?;
            members.push(TeamMember {
                membership_id: membership.id,
                user_id: membership.user_id,
                name: user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
                email: user.map(|u| u.email).unwrap_or_default(),
                role: membership.role,
                joined_at: membership.created_at,
            });
        }

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_reactivates_instead_of_duplicating() {
        let store = MockTeamStore::new();
        let team_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let first = store
            .upsert_membership(team_id, user_id, TeamRole::Manager)
            .await
            .unwrap();
        store.remove_membership(team_id, user_id).await.unwrap();
        let again = store
            .upsert_membership(team_id, user_id, TeamRole::Member)
            .await
            .unwrap();

        assert_eq!(first.id, again.id);
        assert!(again.is_active());
        assert_eq!(again.role, TeamRole::Member);
        assert_eq!(store.membership_rows(team_id, user_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_with_manager_is_atomic() {
        let store = MockTeamStore::new();
        store.fail_membership_writes(true);

        let result = store
            .create_with_manager(
                CreateTeam {
                    name: "Eng".into(),
                    description: None,
                },
                Uuid::new_v4(),
            )
            .await;

        assert!(matches!(result, Err(AuthError::Conflict(_))));
        assert_eq!(store.team_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected_when_linked() {
        let users = MockUserRepository::new();
        let store = MockTeamStore::with_users(&users);

        let err = store
            .upsert_membership(Uuid::new_v4(), Uuid::new_v4(), TeamRole::Member)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NotFound);
    }

    #[tokio::test]
    async fn test_soft_deleted_user_rejected_when_linked() {
        let users = MockUserRepository::new();
        let mut gone = User::mock("Gone", "gone@example.com");
        gone.deleted_at = Some(Utc::now());
        let gone = users.insert(gone).unwrap();
        let store = MockTeamStore::with_users(&users);

        let err = store
            .upsert_membership(Uuid::new_v4(), gone.id, TeamRole::Member)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NotFound);
    }

    #[tokio::test]
    async fn test_archived_team_is_invisible() {
        let store = MockTeamStore::new();
        let team = store
            .create_with_manager(
                CreateTeam {
                    name: "Eng".into(),
                    description: None,
                },
                Uuid::new_v4(),
            )
            .await
            .unwrap();

        store.archive_team(team.id).await.unwrap();

        assert!(store.find_team(team.id).await.unwrap().is_none());
        assert!(store.list_teams().await.unwrap().is_empty());
        assert_eq!(
            store.archive_team(team.id).await.unwrap_err(),
            AuthError::NotFound
        );
        assert_eq!(
            store
                .update_team(team.id, &TeamChanges::default())
                .await
                .unwrap_err(),
            AuthError::NotFound
        );
    }
}
