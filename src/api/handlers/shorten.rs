//! Handler for the shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extractors::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a long URL for the signed-in user.
///
/// # Endpoint
///
/// `POST /make_shorter`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:3000/AB12C",
///   "token": "AB12C",
///   "expires_at": "2025-01-02T12:00:00Z"
/// }
/// ```
///
/// Repeating the request while the record is valid returns the same token.
///
/// # Errors
///
/// - 400 if the URL is malformed or the site is unreachable
/// - 401 without a valid session
pub async fn shorten_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let shortened = state.url_service.shorten(&payload.url, user.id).await?;

    Ok(Json(ShortenResponse {
        short_url: shortened.short_url,
        token: shortened.url.token,
        expires_at: shortened.url.expires_at,
    }))
}
