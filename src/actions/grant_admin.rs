use chrono::Utc;
use uuid::Uuid;

use crate::events::{TeamEvent, dispatch};
use crate::identity::GLOBAL_ADMIN_ROLE;
use crate::validators::normalize_email;
use crate::{AuthError, Identity, User, UserRepository};

/// Promotes a user to global admin.
pub struct GrantAdminAction<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository> GrantAdminAction<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    /// Grants the global admin role. Only a global admin may do this.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "grant_admin", skip(self, actor), err)
    )]
    pub async fn execute(&self, actor: Option<&Identity>, user_id: Uuid) -> Result<User, AuthError> {
        let actor = actor.ok_or(AuthError::Unauthenticated)?;
        if !actor.is_global_admin() {
            return Err(AuthError::Forbidden);
        }

        let user = self
            .user_repository
            .set_global_role(user_id, Some(GLOBAL_ADMIN_ROLE))
            .await?;

        self.granted(&user, Some(actor.user_id)).await;
        Ok(user)
    }

    /// Promotes the user with `email` while no admin exists yet.
    ///
    /// Meant for first-run provisioning by the host program. The admin check
    /// and the promotion happen in one repository call, so concurrent
    /// bootstraps promote at most one user.
    pub async fn bootstrap(&self, email: &str) -> Result<User, AuthError> {
        if self.user_repository.count_admins().await? > 0 {
            return Err(AuthError::Forbidden);
        }

        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::NotFound)?;

        let user = self
            .user_repository
            .grant_first_admin(user.id)
            .await?
            .ok_or(AuthError::Forbidden)?;

        self.granted(&user, None).await;
        Ok(user)
    }

    async fn granted(&self, user: &User, granted_by: Option<Uuid>) {
        log::info!(
            target: "teamgate",
            "msg=\"admin granted\", user_id={}, granted_by={:?}",
            user.id,
            granted_by
        );
        dispatch(TeamEvent::AdminGranted {
            user_id: user.id,
            granted_by,
            at: Utc::now(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockUserRepository;

    #[tokio::test]
    async fn test_admin_can_grant() {
        let repo = MockUserRepository::new();
        let admin = repo
            .insert(User::mock("Root", "root@example.com").with_role("admin"))
            .unwrap();
        let target = repo.insert(User::mock("Ada", "ada@example.com")).unwrap();

        let user = GrantAdminAction::new(repo)
            .execute(Some(&Identity::from_user(&admin)), target.id)
            .await
            .unwrap();
        assert_eq!(user.role.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_grant() {
        let repo = MockUserRepository::new();
        let actor = repo.insert(User::mock("Bob", "bob@example.com")).unwrap();
        let target = repo.insert(User::mock("Ada", "ada@example.com")).unwrap();
        let action = GrantAdminAction::new(repo);

        assert_eq!(
            action
                .execute(Some(&Identity::from_user(&actor)), target.id)
                .await
                .unwrap_err(),
            AuthError::Forbidden
        );
        assert_eq!(
            action.execute(None, target.id).await.unwrap_err(),
            AuthError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_grant_unknown_user() {
        let repo = MockUserRepository::new();
        let admin = repo
            .insert(User::mock("Root", "root@example.com").with_role("admin"))
            .unwrap();

        let err = GrantAdminAction::new(repo)
            .execute(Some(&Identity::from_user(&admin)), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NotFound);
    }

    #[tokio::test]
    async fn test_bootstrap_only_without_admins() {
        let repo = MockUserRepository::new();
        repo.insert(User::mock("Ada", "ada@example.com")).unwrap();
        repo.insert(User::mock("Bob", "bob@example.com")).unwrap();
        let action = GrantAdminAction::new(repo);

        let user = action.bootstrap("Ada@Example.com").await.unwrap();
        assert_eq!(user.role.as_deref(), Some("admin"));

        let err = action.bootstrap("bob@example.com").await.unwrap_err();
        assert_eq!(err, AuthError::Forbidden);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bootstraps_promote_one_user() {
        let repo = MockUserRepository::new();
        let emails: Vec<String> = (0..8).map(|i| format!("user{i}@example.com")).collect();
        for email in &emails {
            repo.insert(User::mock("User", email)).unwrap();
        }

        let mut handles = Vec::new();
        for email in emails {
            let action = GrantAdminAction::new(repo.clone());
            handles.push(tokio::spawn(async move { action.bootstrap(&email).await }));
        }

        let mut promoted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => promoted += 1,
                Err(err) => assert_eq!(err, AuthError::Forbidden),
            }
        }
        assert_eq!(promoted, 1);
        assert_eq!(repo.count_admins().await.unwrap(), 1);
    }
}
