//! API route configuration.
//!
//! Session-protected handlers take a [`crate::api::extractors::CurrentUser`]
//! argument; the rest are public.

use crate::api::handlers::{
    deactivate_handler, health_handler, login_handler, logout_handler, my_stats_handler,
    redirect_handler, register_handler, shorten_handler, stats_handler, url_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes with state applied.
///
/// # Endpoints
///
/// - `POST  /users/register` - Create an account
/// - `POST  /users/login`    - Sign in, sets the session cookie
/// - `POST  /users/logout`   - Clear the session cookie
/// - `POST  /make_shorter`   - Shorten a URL (session)
/// - `GET   /info/urls`      - Paginated short URL list (session)
/// - `GET   /info/stats`     - All records by clicks (session)
/// - `GET   /info/my_stats`  - Caller's records by clicks (session)
/// - `GET   /health`         - Store connectivity
/// - `GET   /{token}`        - Redirect
/// - `PATCH /{token}`        - Deactivate (session)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler))
        .route("/users/logout", post(logout_handler))
        .route("/make_shorter", post(shorten_handler))
        .route("/info/urls", get(url_list_handler))
        .route("/info/stats", get(stats_handler))
        .route("/info/my_stats", get(my_stats_handler))
        .route("/health", get(health_handler))
        .route("/{token}", get(redirect_handler).patch(deactivate_handler))
        .with_state(state)
}
