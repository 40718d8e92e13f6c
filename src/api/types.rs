use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::teams::actions::{CreateTeamInput, UpdateTeamInput};
use crate::teams::{TeamMember, TeamMembership, TeamRole};
use crate::{AuthError, SecretString, User};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateTeamRequest> for CreateTeamInput {
    fn from(body: CreateTeamRequest) -> Self {
        CreateTeamInput {
            name: body.name,
            description: body.description,
        }
    }
}

/// Present fields signal intent to update. Non-string values are not valid
/// to apply and are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
}

fn text(value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

impl From<UpdateTeamRequest> for UpdateTeamInput {
    fn from(body: UpdateTeamRequest) -> Self {
        UpdateTeamInput {
            name: text(body.name),
            description: text(body.description),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddMemberRequest {
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl AddMemberRequest {
    /// Unparseable or absent ids come back nil and fail validation downstream.
    pub fn user_id(&self) -> Uuid {
        self.user_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id.trim()).ok())
            .unwrap_or_else(Uuid::nil)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: TeamRole,
    pub is_manager: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<TeamMembership> for MembershipResponse {
    fn from(m: TeamMembership) -> Self {
        MembershipResponse {
            is_manager: m.is_manager(),
            id: m.id,
            team_id: m.team_id,
            user_id: m.user_id,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
            deleted_at: m.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub membership_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: TeamRole,
    pub is_manager: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<TeamMember> for MemberResponse {
    fn from(m: TeamMember) -> Self {
        MemberResponse {
            is_manager: m.is_manager(),
            membership_id: m.membership_id,
            user_id: m.user_id,
            name: m.name,
            email: m.email,
            role: m.role,
            joined_at: m.joined_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse {
            error: err.public_message(),
            code: err.kind().code().to_owned(),
        }
    }
}
