mod error;
mod handlers;
mod middleware;
mod routes;
pub mod teams;

pub use error::AppError;
pub use middleware::{AuthenticatedIdentity, OptionalIdentity, extract_bearer_token};
pub use routes::{AppState, auth_routes, health_routes, router};
pub use teams::{MemberPath, TeamIdPath, team_routes};
