use uuid::Uuid;

use crate::{AuthError, User, UserRepository};

pub struct GetUserAction<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository> GetUserAction<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_user", skip(self), err)
    )]
    pub async fn execute(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
