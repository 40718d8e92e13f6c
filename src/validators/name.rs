use super::ValidationError;

/// Shortest team name accepted after trimming.
pub const MIN_TEAM_NAME_LENGTH: usize = 2;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty);
    }

    if trimmed.chars().count() > 100 {
        return Err(ValidationError::NameTooLong);
    }

    Ok(())
}

/// Trims a team name and returns it if it is long enough to store.
pub fn validate_team_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();

    if trimmed.chars().count() < MIN_TEAM_NAME_LENGTH {
        return Err(ValidationError::TeamNameTooShort);
    }

    Ok(trimmed.to_owned())
}
