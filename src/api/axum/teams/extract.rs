//! Path extractors for team routes.
//!
//! A segment that is not a UUID is answered with a `VALIDATION_ERROR` body
//! instead of axum's plain-text rejection.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::api::axum::AppError;
use crate::{AuthError, ValidationError};

/// `/teams/{team_id}`
#[derive(Debug, Clone, Copy)]
pub struct TeamIdPath(pub Uuid);

/// `/teams/{team_id}/members/{user_id}`
#[derive(Debug, Clone, Copy)]
pub struct MemberPath(pub Uuid, pub Uuid);

fn invalid(field: &'static str) -> AppError {
    AppError(AuthError::Validation(ValidationError::IdMissing(field)))
}

fn parse_id(raw: &str, field: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| invalid(field))
}

impl<S: Send + Sync> FromRequestParts<S> for TeamIdPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid("team_id"))?;

        parse_id(&raw, "team_id").map(Self)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MemberPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((team_id, user_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid("team_id"))?;

        Ok(Self(parse_id(&team_id, "team_id")?, parse_id(&user_id, "user_id")?))
    }
}
