use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::AppError;
use super::routes::AppState;
use crate::teams::{TeamMembershipRepository, TeamRepository};
use crate::{AuthError, Identity, UserRepository};

/// Identity verified from the `Authorization: Bearer` JWT. Rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(pub Identity);

/// Like [`AuthenticatedIdentity`], but a missing header yields `None`.
///
/// A header that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
}

impl<U, T, M> FromRequestParts<AppState<U, T, M>> for AuthenticatedIdentity
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, T, M>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            extract_bearer_token(&parts.headers).ok_or(AppError(AuthError::Unauthenticated))?;

        let identity = state.jwt.verify(&token).map_err(AppError)?;

        Ok(Self(identity))
    }
}

impl<U, T, M> FromRequestParts<AppState<U, T, M>> for OptionalIdentity
where
    U: UserRepository + Clone + 'static,
    T: TeamRepository + Clone + 'static,
    M: TeamMembershipRepository + Clone + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, T, M>,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Self(None));
        }

        let AuthenticatedIdentity(identity) =
            AuthenticatedIdentity::from_request_parts(parts, state).await?;
        Ok(Self(Some(identity)))
    }
}
