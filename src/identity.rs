//! Caller identity and global-admin resolution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jwt::JwtClaims;
use crate::{AuthError, User};

/// Global role literal that grants authority over every team.
pub const GLOBAL_ADMIN_ROLE: &str = "admin";

/// The authenticated caller, derived from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub global_role: Option<String>,
}

impl Identity {
    pub fn new(user_id: Uuid, email: impl Into<String>, global_role: Option<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            global_role,
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::TokenInvalid` if `sub` is not a UUID.
    pub fn from_claims(claims: &JwtClaims) -> Result<Self, AuthError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email.clone(),
            global_role: claims.role.clone(),
        })
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            global_role: user.role.clone(),
        }
    }

    /// Exact match on `admin`, ignoring ASCII case. Padded or otherwise
    /// malformed roles are not admins.
    pub fn is_global_admin(&self) -> bool {
        self.global_role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case(GLOBAL_ADMIN_ROLE))
    }
}

/// Returns true iff an identity is present and its global role is `admin`.
pub fn is_global_admin(identity: Option<&Identity>) -> bool {
    identity.is_some_and(Identity::is_global_admin)
}
