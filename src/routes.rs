//! Top-level router: API routes plus tracing and path normalization.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slashes are trimmed before routing

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<axum::Router> {
    let router = api::routes::router(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
