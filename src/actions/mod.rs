//! User account actions.
//!
//! Each action wraps its repositories and exposes a single `execute`.
//! Team actions live in [`crate::teams::actions`].

mod get_user;
mod grant_admin;
mod login;
mod signup;

pub use get_user::GetUserAction;
pub use grant_admin::GrantAdminAction;
pub use login::{LoginAction, LoginResponse};
pub use signup::SignupAction;

#[cfg(test)]
pub(crate) fn test_hasher() -> crate::crypto::Argon2Hasher {
    crate::crypto::Argon2Hasher::new(1024, 1, 1)
}
