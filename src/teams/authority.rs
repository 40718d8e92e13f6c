//! Team-level authority checks.

use uuid::Uuid;

use super::TeamMembershipRepository;
use crate::{AuthError, Identity};

/// Whether `user_id` holds manager-tier authority over `team_id`.
///
/// Nil ids resolve to `false` without touching storage. Never writes.
pub async fn has_team_authority<M>(
    memberships: &M,
    user_id: Uuid,
    team_id: Uuid,
) -> Result<bool, AuthError>
where
    M: TeamMembershipRepository + ?Sized,
{
    if user_id.is_nil() || team_id.is_nil() {
        return Ok(false);
    }

    Ok(memberships
        .find_membership(team_id, user_id)
        .await?
        .is_some_and(|m| m.is_manager()))
}

/// Global admins manage every team; anyone else needs team authority.
pub async fn can_manage<M>(memberships: &M, actor: &Identity, team_id: Uuid) -> Result<bool, AuthError>
where
    M: TeamMembershipRepository + ?Sized,
{
    if actor.is_global_admin() {
        return Ok(true);
    }

    has_team_authority(memberships, actor.user_id, team_id).await
}

/// Whether the actor may read the team: global admin or any active membership.
pub async fn can_view<M>(memberships: &M, actor: &Identity, team_id: Uuid) -> Result<bool, AuthError>
where
    M: TeamMembershipRepository + ?Sized,
{
    if actor.is_global_admin() {
        return Ok(true);
    }

    if actor.user_id.is_nil() || team_id.is_nil() {
        return Ok(false);
    }

    Ok(memberships
        .find_membership(team_id, actor.user_id)
        .await?
        .is_some())
}
