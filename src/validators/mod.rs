mod email;
mod name;
mod password;

pub use email::{normalize_email, validate_email};
pub use name::{MIN_TEAM_NAME_LENGTH, validate_name, validate_team_name};
pub use password::{PasswordPolicy, validate_password};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email cannot be empty")]
    EmailEmpty,
    #[error("email is too long (max 254 characters)")]
    EmailTooLong,
    #[error("invalid email format")]
    EmailInvalidFormat,
    #[error("password cannot be empty")]
    PasswordEmpty,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("password is too long (max {0} characters)")]
    PasswordTooLong(usize),
    #[error("name cannot be empty")]
    NameEmpty,
    #[error("name is too long (max 100 characters)")]
    NameTooLong,
    #[error("{0} is required")]
    IdMissing(&'static str),
    #[error("team name must be at least 2 characters")]
    TeamNameTooShort,
    #[error("no valid fields to update")]
    NothingToUpdate,
    #[error("role is required")]
    RoleMissing,
    #[error("invalid role, expected one of: member, manager, admin")]
    InvalidRole,
}
