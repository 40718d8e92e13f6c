use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// Membership tier within a single team, ordered from least to most authority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    #[default]
    Member,
    Manager,
    Admin,
}

impl TeamRole {
    /// Every recognized role, lowest tier first.
    pub const ALL: [TeamRole; 3] = [TeamRole::Member, TeamRole::Manager, TeamRole::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Case-insensitive parse of a role name.
    pub fn parse(role: &str) -> Result<Self, ValidationError> {
        let role = role.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(role))
            .ok_or(ValidationError::InvalidRole)
    }

    /// Manager and admin tiers carry authority over the team.
    pub fn is_manager_tier(self) -> bool {
        self >= Self::Manager
    }

    /// Resolves the stored pair of role text and manager flag into one tier.
    ///
    /// A set flag lifts an unrecognized or member-tier role to manager.
    pub fn resolve(role: &str, is_manager: bool) -> Self {
        let parsed = Self::parse(role).unwrap_or(Self::Member);
        if is_manager && !parsed.is_manager_tier() {
            Self::Manager
        } else {
            parsed
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Static catalog of role names.
pub fn list_roles() -> Vec<&'static str> {
    TeamRole::ALL.iter().map(|r| r.as_str()).collect()
}
