use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SoftDelete;
use crate::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Global role, canonically `"admin"` or absent.
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDelete for User {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock(name: &str, email: &str) -> Self {
        Self::mock_from_credentials(name, email, "fakehashedpassword")
    }

    pub fn mock_from_credentials(name: &str, email: &str, hashed_password: &str) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            role: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_owned());
        self
    }
}

/// User storage. Every lookup ignores soft-deleted users.
///
/// Emails reaching the repository are already normalized.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    /// Fails with `AuthError::UserAlreadyExists` when the email is taken.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AuthError>;
    /// Fails with `AuthError::NotFound` when the user does not exist.
    async fn set_global_role(&self, user_id: Uuid, role: Option<&str>)
    -> Result<User, AuthError>;
    /// Number of active users whose global role is `admin`.
    async fn count_admins(&self) -> Result<i64, AuthError>;
    /// Makes the user a global admin only if no active admin exists, as one
    /// atomic step. `None` when an admin already exists or the user is gone.
    async fn grant_first_admin(&self, user_id: Uuid) -> Result<Option<User>, AuthError>;
}
