use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::events::{TeamEvent, dispatch};
use crate::validators::{PasswordPolicy, normalize_email, validate_email, validate_name};
use crate::{AuthError, User, UserRepository};

/// Registers a new user with no global role.
pub struct SignupAction<U: UserRepository, H: PasswordHasher = Argon2Hasher> {
    user_repository: U,
    hasher: H,
    policy: PasswordPolicy,
}

impl<U: UserRepository> SignupAction<U> {
    pub fn new(user_repository: U) -> Self {
        Self::with_hasher(user_repository, Argon2Hasher::default())
    }
}

impl<U: UserRepository, H: PasswordHasher> SignupAction<U, H> {
    pub fn with_hasher(user_repository: U, hasher: H) -> Self {
        Self {
            user_repository,
            hasher,
            policy: PasswordPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signup", skip_all, err)
    )]
    pub async fn execute(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = name.trim();
        let email = normalize_email(email);

        validate_name(name)?;
        validate_email(&email)?;
        self.policy.validate(password)?;

        if self.user_repository.find_user_by_email(&email).await?.is_some() {
            log::info!(
                target: "teamgate",
                "msg=\"signup rejected\", reason=\"email taken\""
            );
            return Err(AuthError::UserAlreadyExists);
        }

        let hashed = self.hasher.hash(password)?;
        let user = self
            .user_repository
            .create_user(name, &email, &hashed)
            .await?;

        log::info!(
            target: "teamgate",
            "msg=\"user registered\", user_id={}",
            user.id
        );

        dispatch(TeamEvent::UserRegistered {
            user_id: user.id,
            email: user.email.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(user)
    }
}
