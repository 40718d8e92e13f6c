use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::teams::TeamRole;

/// Events emitted by user and team actions.
///
/// Actions fire events unconditionally. Without registered listeners they are
/// dropped. Register listeners via
/// [`register_event_listeners`](crate::events::register_event_listeners).
#[derive(Debug, Clone)]
pub enum TeamEvent {
    // users
    UserRegistered {
        user_id: Uuid,
        email: String,
        at: DateTime<Utc>,
    },
    LoginSucceeded {
        user_id: Uuid,
        at: DateTime<Utc>,
    },
    LoginFailed {
        email: String,
        at: DateTime<Utc>,
    },
    AdminGranted {
        user_id: Uuid,
        granted_by: Option<Uuid>,
        at: DateTime<Utc>,
    },

    // teams
    TeamCreated {
        team_id: Uuid,
        created_by: Uuid,
        at: DateTime<Utc>,
    },
    TeamUpdated {
        team_id: Uuid,
        updated_by: Uuid,
        at: DateTime<Utc>,
    },
    TeamArchived {
        team_id: Uuid,
        archived_by: Uuid,
        at: DateTime<Utc>,
    },

    // memberships
    MemberAdded {
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
        added_by: Uuid,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        team_id: Uuid,
        user_id: Uuid,
        removed_by: Uuid,
        at: DateTime<Utc>,
    },
    MemberRoleChanged {
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
        changed_by: Uuid,
        at: DateTime<Utc>,
    },
}

impl TeamEvent {
    /// Dot-separated event name for logging and tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::LoginSucceeded { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::AdminGranted { .. } => "user.admin_granted",
            Self::TeamCreated { .. } => "team.created",
            Self::TeamUpdated { .. } => "team.updated",
            Self::TeamArchived { .. } => "team.archived",
            Self::MemberAdded { .. } => "team.member.added",
            Self::MemberRemoved { .. } => "team.member.removed",
            Self::MemberRoleChanged { .. } => "team.member.role_changed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::AdminGranted { at, .. }
            | Self::TeamCreated { at, .. }
            | Self::TeamUpdated { at, .. }
            | Self::TeamArchived { at, .. }
            | Self::MemberAdded { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::MemberRoleChanged { at, .. } => *at,
        }
    }

    /// Team the event concerns, if any.
    pub fn team_id(&self) -> Option<Uuid> {
        match self {
            Self::TeamCreated { team_id, .. }
            | Self::TeamUpdated { team_id, .. }
            | Self::TeamArchived { team_id, .. }
            | Self::MemberAdded { team_id, .. }
            | Self::MemberRemoved { team_id, .. }
            | Self::MemberRoleChanged { team_id, .. } => Some(*team_id),
            _ => None,
        }
    }
}
