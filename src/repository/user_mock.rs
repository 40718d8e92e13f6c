use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{SoftDelete, User, UserRepository};
use crate::AuthError;
use crate::identity::GLOBAL_ADMIN_ROLE;

/// In-memory user store.
///
/// The user list is shared behind an `Arc`, so clones observe the same users.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a prepared user directly, bypassing validation.
    pub fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;
        Ok(users
            .iter()
            .find(|u| u.id == id && u.is_active())
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;
        Ok(users
            .iter()
            .find(|u| u.email == email && u.is_active())
            .cloned())
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AuthError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;

        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User::mock_from_credentials(name, email, hashed_password);
        users.push(user.clone());

        Ok(user)
    }

    async fn set_global_role(
        &self,
        user_id: Uuid,
        role: Option<&str>,
    ) -> Result<User, AuthError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;

        let user = users
            .iter_mut()
            .find(|u| u.id == user_id && u.is_active())
            .ok_or(AuthError::NotFound)?;

        user.role = role.map(str::to_owned);
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn count_admins(&self) -> Result<i64, AuthError> {
        let users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;

        let count = users
            .iter()
            .filter(|u| u.is_active())
            .filter(|u| {
                u.role
                    .as_deref()
                    .is_some_and(|r| r.eq_ignore_ascii_case(GLOBAL_ADMIN_ROLE))
            })
            .count();

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn grant_first_admin(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AuthError::Internal("lock poisoned".into()))?;

        let admin_exists = users.iter().any(|u| {
            u.is_active()
                && u.role
                    .as_deref()
                    .is_some_and(|r| r.eq_ignore_ascii_case(GLOBAL_ADMIN_ROLE))
        });
        if admin_exists {
            return Ok(None);
        }

        let Some(user) = users.iter_mut().find(|u| u.id == user_id && u.is_active()) else {
            return Ok(None);
        };
        user.role = Some(GLOBAL_ADMIN_ROLE.to_owned());
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}
