//! Handlers for the authentication endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::error::AppError;
use super::middleware::AuthenticatedIdentity;
use super::routes::AppState;
use crate::actions::{GetUserAction, LoginAction, SignupAction};
use crate::api::{AuthResponse, HealthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::teams::{TeamMembershipRepository, TeamRepository};
use crate::UserRepository;

/// POST /auth/register
pub async fn register<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let action = SignupAction::with_hasher(state.user_repo, state.hasher);
    let user = action
        .execute(&body.name, &body.email, body.password.expose_secret())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /auth/login
pub async fn login<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let action = LoginAction::with_hasher(state.user_repo, state.jwt, state.hasher);
    let response = action
        .execute(&body.email, body.password.expose_secret())
        .await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(response.user),
        token: response.token,
        expires_at: response.expires_at,
    }))
}

/// GET /auth/me
pub async fn me<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> Result<Json<UserResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    let user = GetUserAction::new(state.user_repo)
        .execute(identity.user_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
