use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Length rules applied to passwords at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length (default: 8)
    pub min_length: usize,
    /// Maximum password length (default: 128)
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 12 to 128 characters.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            min_length: 12,
            max_length: 128,
        }
    }

    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::PasswordEmpty);
        }

        let len = password.chars().count();
        if len < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }
        if len > self.max_length {
            return Err(ValidationError::PasswordTooLong(self.max_length));
        }

        Ok(())
    }
}

/// Validates against the default policy.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}
