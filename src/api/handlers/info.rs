//! Handlers for the `/info` listing endpoints.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::info::UrlListParams;
use crate::api::extractors::CurrentUser;
use crate::domain::entities::Url;
use crate::error::AppError;
use crate::state::AppState;

/// Lists issued short URLs in creation order.
///
/// # Endpoint
///
/// `GET /info/urls?skip=0&limit=20&active_only=false`
///
/// # Response
///
/// ```json
/// ["http://localhost:3000/AB12C", "http://localhost:3000/QW3RT"]
/// ```
///
/// # Errors
///
/// Returns 400 if a parameter does not parse, `limit` is outside 1..=100 or
/// `skip` is negative.
pub async fn url_list_handler(
    State(state): State<AppState>,
    _user: CurrentUser,
    params: Result<Query<UrlListParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let Query(params) = params?;
    let (active_only, offset, limit) = params.resolve();

    let tokens = state
        .url_service
        .list_tokens(active_only, offset, limit)
        .await?;

    Ok(Json(
        tokens
            .iter()
            .map(|token| state.url_service.short_url(token))
            .collect(),
    ))
}

/// All Url records, most clicked first.
///
/// # Endpoint
///
/// `GET /info/stats`
pub async fn stats_handler(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Url>>, AppError> {
    Ok(Json(state.url_service.list_by_clicks_desc().await?))
}

/// The caller's own Url records, most clicked first.
///
/// # Endpoint
///
/// `GET /info/my_stats`
pub async fn my_stats_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Url>>, AppError> {
    Ok(Json(
        state.url_service.list_owned_by_clicks_desc(user.id).await?,
    ))
}
