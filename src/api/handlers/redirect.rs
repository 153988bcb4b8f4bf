//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its long URL and counts the click.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Errors
///
/// - 404 if the token is unknown
/// - 410 if the record is deactivated or expired
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.url_service.redirect(&token).await?;

    Ok(Redirect::temporary(&url.long_url))
}
