//! Team membership authorization for REST backends.
//!
//! `teamgate` resolves who may view, create, modify, and archive teams and
//! their memberships. Callers authenticate with a JWT; the decoded claims
//! become an [`Identity`] that every team action receives as its actor.
//!
//! Storage is abstracted behind repository traits with `PostgreSQL`
//! implementations (`sqlx_postgres` feature) and in-memory implementations
//! (`mocks` feature). The `axum_api` feature mounts the whole surface as an
//! axum router.

pub mod actions;
pub mod config;
pub mod crypto;
pub mod events;
pub mod identity;
pub mod jwt;
pub mod repository;
pub mod teams;
pub mod validators;

mod secret;

#[cfg(feature = "axum_api")]
pub mod api;

#[cfg(feature = "sqlx_postgres")]
pub mod postgres;

pub use identity::{Identity, is_global_admin};
pub use repository::{SoftDelete, User, UserRepository};
pub use secret::SecretString;
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;

/// Machine-checkable category of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Stable code used in API error bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("you do not have permission to perform this action")]
    Forbidden,
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("resource not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("token has expired")]
    TokenExpired,
    #[error("invalid token")]
    TokenInvalid,
    #[error("failed to hash password")]
    PasswordHashError,
    #[error("database error: {0}")]
    DatabaseError(String),
    #[error("configuration error: {0}")]
    ConfigurationError(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => ErrorKind::Unauthenticated,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::Conflict(_) | Self::UserAlreadyExists => ErrorKind::Conflict,
            Self::PasswordHashError
            | Self::DatabaseError(_)
            | Self::ConfigurationError(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message that is safe to hand back to a caller.
    ///
    /// Storage and internal details are replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}
