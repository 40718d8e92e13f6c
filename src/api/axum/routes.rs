use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use super::teams::team_routes;
use crate::crypto::Argon2Hasher;
use crate::jwt::JwtService;
use crate::teams::{TeamMembershipRepository, TeamRepository};
use crate::UserRepository;

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState<U, T, M> {
    pub user_repo: U,
    pub team_repo: T,
    pub membership_repo: M,
    pub jwt: JwtService,
    pub hasher: Argon2Hasher,
}

impl<U, T, M> AppState<U, T, M> {
    pub fn new(user_repo: U, team_repo: T, membership_repo: M, jwt: JwtService) -> Self {
        Self {
            user_repo,
            team_repo,
            membership_repo,
            jwt,
            hasher: Argon2Hasher::default(),
        }
    }

    #[must_use]
    pub fn with_hasher(mut self, hasher: Argon2Hasher) -> Self {
        self.hasher = hasher;
        self
    }
}

/// `POST /register`, `POST /login`, `GET /me`.
pub fn auth_routes<U, T, M>() -> Router<AppState<U, T, M>>
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<U, T, M>))
        .route("/login", post(handlers::login::<U, T, M>))
        .route("/me", get(handlers::me::<U, T, M>))
}

/// `GET /health`, unauthenticated.
pub fn health_routes<U, T, M>() -> Router<AppState<U, T, M>>
where
    U: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(handlers::health))
}

/// The full API: `/auth/*`, team and role routes, and `/health`.
pub fn router<U, T, M>(state: AppState<U, T, M>) -> Router
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    Router::new()
        .nest("/auth", auth_routes())
        .merge(team_routes())
        .merge(health_routes())
        .with_state(state)
}
