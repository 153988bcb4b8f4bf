#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Duration;
use serde_json::json;
use shorturl::api::routes::router;
use shorturl::domain::SiteChecker;
use shorturl::error::AppError;
use shorturl::infrastructure::memory::{InMemoryUrlRepository, InMemoryUserRepository};
use shorturl::state::{AppState, ServiceSettings};
use shorturl::utils::session_token::SessionKeys;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";
pub const SECRET: &str = "test-signing-secret";

/// Site checker that accepts every URL.
pub struct AlwaysReachable;

#[async_trait]
impl SiteChecker for AlwaysReachable {
    async fn check(&self, _url: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Site checker that rejects every URL with a fixed reason.
pub struct Unreachable(pub &'static str);

#[async_trait]
impl SiteChecker for Unreachable {
    async fn check(&self, _url: &str) -> Result<(), AppError> {
        Err(AppError::invalid_site(self.0))
    }
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        base_url: BASE_URL.to_string(),
        url_ttl: Duration::hours(24),
        session_keys: SessionKeys::new(SECRET, Duration::minutes(30)),
    }
}

/// Router plus direct handles on the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub urls: Arc<InMemoryUrlRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_checker(Arc::new(AlwaysReachable))
}

pub fn spawn_app_with_checker(site_checker: Arc<dyn SiteChecker>) -> TestApp {
    let urls = Arc::new(InMemoryUrlRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());

    let state = AppState::new(urls.clone(), users.clone(), site_checker, test_settings());
    let server = TestServer::new(router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        urls,
        users,
    }
}

/// `Cookie` header value carrying a session token.
pub fn session_cookie(token: &str) -> String {
    format!("shortener_access_token={token}")
}

/// Registers `username` and returns a session token for it.
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    server
        .post("/users/register")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/users/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Shortens `long_url` as the session owner and returns the response body.
pub async fn shorten(server: &TestServer, session: &str, long_url: &str) -> serde_json::Value {
    let response = server
        .post("/make_shorter")
        .add_header("Cookie", session_cookie(session))
        .json(&json!({ "url": long_url }))
        .await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()
}
