//! Team and membership endpoints.

mod extract;
mod handlers;
mod routes;

pub use extract::{MemberPath, TeamIdPath};
pub use routes::team_routes;
