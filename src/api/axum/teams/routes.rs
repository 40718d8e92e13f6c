use axum::Router;
use axum::routing::{get, patch};

use super::handlers;
use crate::api::axum::AppState;
use crate::teams::{TeamMembershipRepository, TeamRepository};
use crate::UserRepository;

/// Team routes. Every route requires a bearer identity.
///
/// - `GET /teams`, `POST /teams`
/// - `GET /teams/{id}`, `PATCH /teams/{id}`, `DELETE /teams/{id}`
/// - `GET /teams/{team_id}/members`, `POST /teams/{team_id}/members`
/// - `PATCH /teams/{team_id}/members/{user_id}`, `DELETE /teams/{team_id}/members/{user_id}`
/// - `GET /roles`
pub fn team_routes<U, T, M>() -> Router<AppState<U, T, M>>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    Router::new()
        .route(
            "/teams",
            get(handlers::list_teams::<U, T, M>).post(handlers::create_team::<U, T, M>),
        )
        .route(
            "/teams/{team_id}",
            get(handlers::get_team::<U, T, M>)
                .patch(handlers::update_team::<U, T, M>)
                .delete(handlers::archive_team::<U, T, M>),
        )
        .route(
            "/teams/{team_id}/members",
            get(handlers::list_members::<U, T, M>).post(handlers::add_member::<U, T, M>),
        )
        .route(
            "/teams/{team_id}/members/{user_id}",
            patch(handlers::change_member_role::<U, T, M>)
                .delete(handlers::remove_member::<U, T, M>),
        )
        .route("/roles", get(handlers::list_roles::<U, T, M>))
}
