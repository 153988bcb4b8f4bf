//! Session extraction for protected handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the HTTP-only cookie carrying the session token.
pub const SESSION_COOKIE: &str = "shortener_access_token";

/// The authenticated caller, resolved from the session cookie.
///
/// Rejects with 401: [`AppError::Unauthorized`] when the cookie is absent,
/// [`AppError::InvalidToken`] or [`AppError::TokenExpired`] when it does not
/// validate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

        let user = state
            .auth_service
            .validate_session_token(&token)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "Session rejected"))?;

        Ok(CurrentUser(user))
    }
}
