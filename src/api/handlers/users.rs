//! Handlers for registration, login and logout.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use validator::Validate;

use crate::api::dto::users::{LoginRequest, LoginResponse, RegisterRequest, StatusResponse};
use crate::api::extractors::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /users/register`
///
/// # Errors
///
/// - 400 if username or password length is out of bounds
/// - 409 if the username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    payload.validate()?;

    state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "registration successful",
        }),
    ))
}

/// Authenticates and sets the session cookie.
///
/// # Endpoint
///
/// `POST /users/login`
///
/// The token is returned in the body as well as in the HTTP-only
/// `shortener_access_token` cookie.
///
/// # Errors
///
/// Returns 401 on unknown username or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let access_token = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, access_token.clone()))
        .http_only(true)
        .path("/")
        .build();

    Ok((jar.add(cookie), Json(LoginResponse { access_token })))
}

/// Clears the session cookie. Always succeeds.
///
/// # Endpoint
///
/// `POST /users/logout`
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<StatusResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    (
        jar,
        Json(StatusResponse {
            status: "logout successful",
        }),
    )
}
