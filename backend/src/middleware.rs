//! Bearer-token authentication extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::user_models::User;
use crate::services::{auth, tokens::Claims};
use crate::state::AppState;

/// Extractor that requires a valid, non-revoked access token.
///
/// ```rust,ignore
/// async fn handler(RequireAuth { user, .. }: RequireAuth) -> String {
///     user.name
/// }
/// ```
pub struct RequireAuth {
    pub user: User,
    pub claims: Claims,
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::Unauthorized("Authorization header missing".to_string()))?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Ok(token),
        _ => Err(AppError::Unauthorized("Invalid token format.".to_string())),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::Unauthorized("Invalid token format.".to_string()))?,
            ),
            None => None,
        };

        let token = bearer_token(header).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Rejected request without usable bearer token");
            e
        })?;

        let conn = &mut state.pool.get()?;
        let (user, claims) = auth::authenticate(conn, &state.tokens, token).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Rejected bearer token");
            e
        })?;

        Ok(Self { user, claims })
    }
}
