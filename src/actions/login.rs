use chrono::{DateTime, Utc};

use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::events::{TeamEvent, dispatch};
use crate::jwt::JwtService;
use crate::validators::normalize_email;
use crate::{AuthError, Identity, SecretString, User, UserRepository};

/// Response from a successful login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: User,
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

/// Verifies credentials and issues a JWT access token.
pub struct LoginAction<U: UserRepository, H: PasswordHasher = Argon2Hasher> {
    user_repository: U,
    hasher: H,
    jwt_service: JwtService,
}

impl<U: UserRepository> LoginAction<U> {
    pub fn new(user_repository: U, jwt_service: JwtService) -> Self {
        Self::with_hasher(user_repository, jwt_service, Argon2Hasher::default())
    }
}

impl<U: UserRepository, H: PasswordHasher> LoginAction<U, H> {
    pub fn with_hasher(user_repository: U, jwt_service: JwtService, hasher: H) -> Self {
        Self {
            user_repository,
            hasher,
            jwt_service,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repository.find_user_by_email(&email).await? else {
            return Err(self.reject(email).await);
        };

        if !self.hasher.verify(password, &user.hashed_password)? {
            return Err(self.reject(email).await);
        }

        let issued = self.jwt_service.issue(&Identity::from_user(&user))?;

        dispatch(TeamEvent::LoginSucceeded {
            user_id: user.id,
            at: Utc::now(),
        })
        .await;

        Ok(LoginResponse {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn reject(&self, email: String) -> AuthError {
        log::info!(target: "teamgate", "msg=\"login failed\"");
        dispatch(TeamEvent::LoginFailed {
            email,
            at: Utc::now(),
        })
        .await;
        AuthError::InvalidCredentials
    }
}
