//! Teams, memberships and the rules for who may change them.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`TeamRole`] | Three ordered membership tiers |
//! | [`has_team_authority`] | Manager-tier membership check against storage |
//! | [`can_manage`] | Global admin or team authority |
//! | [`TeamRepository`] | Team storage |
//! | [`TeamMembershipRepository`] | Membership storage with upsert semantics |
//!
//! Actions in [`actions`] enforce the checks before writing.

pub mod actions;
mod authority;
mod repository;
mod role;
mod types;

pub use authority::{can_manage, can_view, has_team_authority};
pub use repository::{CreateTeam, TeamChanges, TeamMembershipRepository, TeamRepository};
pub use role::{TeamRole, list_roles};
pub use types::{Team, TeamMember, TeamMembership};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::MockTeamStore;
