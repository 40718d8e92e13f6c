//! `PostgreSQL` implementations of the team repositories.

mod membership;
mod team;

pub use membership::PostgresTeamMembershipRepository;
pub use team::PostgresTeamRepository;
