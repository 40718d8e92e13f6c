use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::extract::{MemberPath, TeamIdPath};
use crate::api::axum::{AppError, AppState, AuthenticatedIdentity, OptionalIdentity};
use crate::api::{
    AddMemberRequest, ChangeRoleRequest, CreateTeamRequest, MemberResponse, MembershipResponse,
    RolesResponse, UpdateTeamRequest,
};
use crate::teams::actions::{
    AddMemberAction, ArchiveTeamAction, ChangeMemberRoleAction, CreateTeamAction, GetTeamAction,
    ListMembersAction, ListTeamsAction, RemoveMemberAction, UpdateTeamAction,
};
use crate::teams::{Team, TeamMembershipRepository, TeamRepository, list_roles as role_catalog};
use crate::UserRepository;

pub async fn list_teams<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
) -> Result<Json<Vec<Team>>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let teams = ListTeamsAction::new(state.team_repo).execute(&actor).await?;
    Ok(Json(teams))
}

/// Absent identity reaches the action, which answers 401.
pub async fn create_team<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    OptionalIdentity(actor): OptionalIdentity,
    Json(body): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let team = CreateTeamAction::new(state.team_repo)
        .execute(actor.as_ref(), body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn get_team<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    TeamIdPath(team_id): TeamIdPath,
) -> Result<Json<Team>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let team = GetTeamAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id)
        .await?;
    Ok(Json(team))
}

pub async fn update_team<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    TeamIdPath(team_id): TeamIdPath,
    Json(body): Json<UpdateTeamRequest>,
) -> Result<Json<Team>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let team = UpdateTeamAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id, body.into())
        .await?;
    Ok(Json(team))
}

pub async fn archive_team<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    TeamIdPath(team_id): TeamIdPath,
) -> Result<Json<Team>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let team = ArchiveTeamAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id)
        .await?;
    Ok(Json(team))
}

pub async fn list_members<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    TeamIdPath(team_id): TeamIdPath,
) -> Result<Json<Vec<MemberResponse>>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let members = ListMembersAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id)
        .await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

pub async fn add_member<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    TeamIdPath(team_id): TeamIdPath,
    Json(body): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let membership = AddMemberAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id, body.user_id(), body.role.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(membership.into())))
}

pub async fn change_member_role<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    MemberPath(team_id, user_id): MemberPath,
    Json(body): Json<ChangeRoleRequest>,
) -> Result<Json<MembershipResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let membership = ChangeMemberRoleAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id, user_id, body.role.as_deref())
        .await?;
    Ok(Json(membership.into()))
}

pub async fn remove_member<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(actor): AuthenticatedIdentity,
    MemberPath(team_id, user_id): MemberPath,
) -> Result<Json<MembershipResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let membership = RemoveMemberAction::new(state.team_repo, state.membership_repo)
        .execute(&actor, team_id, user_id)
        .await?;
    Ok(Json(membership.into()))
}

/// Requires authentication only.
pub async fn list_roles<U, T, M>(
    AuthenticatedIdentity(_actor): AuthenticatedIdentity,
) -> Json<RolesResponse>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    Json(RolesResponse {
        roles: role_catalog(),
    })
}
