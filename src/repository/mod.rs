//! User storage abstraction and the soft-delete capability.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`UserRepository`] | User lookup, creation and global-role changes |
//! | [`User`] | User account data |
//! | [`SoftDelete`] | Rows retired by timestamp instead of removal |
//!
//! Team storage lives in [`crate::teams`].
//!
//! Enable the `mocks` feature for [`MockUserRepository`], an in-memory
//! implementation useful for testing.

mod soft_delete;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use soft_delete::SoftDelete;
pub use user::User;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
