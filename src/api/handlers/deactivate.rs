//! Handler for short URL deactivation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::extractors::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Marks a short URL inactive.
///
/// # Endpoint
///
/// `PATCH /{token}`
///
/// Any signed-in user may deactivate any token. Unknown tokens also
/// answer 204.
pub async fn deactivate_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    tracing::debug!(token = %token, user_id = %user.id, "Deactivation requested");

    state.url_service.deactivate(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}
