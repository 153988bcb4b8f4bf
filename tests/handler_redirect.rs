mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use shorturl::domain::entities::NewUrl;
use shorturl::domain::repositories::UrlRepository;
use uuid::Uuid;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::spawn_app();
    let session = common::register_and_login(&app.server, "alice", "pw123").await;
    let created = common::shorten(&app.server, &session, "https://example.com/page").await;
    let token = created["token"].as_str().unwrap();

    let response = app.server.get(&format!("/{token}")).await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/page");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let app = common::spawn_app();
    let session = common::register_and_login(&app.server, "alice", "pw123").await;
    let created = common::shorten(&app.server, &session, "https://example.com").await;
    let token = created["token"].as_str().unwrap();

    for _ in 0..3 {
        app.server.get(&format!("/{token}")).await;
    }

    let url = app.urls.find_by_token(token).await.unwrap().unwrap();
    assert_eq!(url.number_of_clicks, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::spawn_app();

    let response = app.server.get("/ZZZZZ").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unknown_token");
    assert_eq!(json["error"]["message"], "URL 'ZZZZZ' doesn't exist");
}

#[tokio::test]
async fn test_redirect_malformed_token_not_found() {
    let app = common::spawn_app();

    let response = app.server.get("/lower").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unknown_token");
}

#[tokio::test]
async fn test_redirect_inactive() {
    let app = common::spawn_app();
    let session = common::register_and_login(&app.server, "alice", "pw123").await;
    let created = common::shorten(&app.server, &session, "https://example.com").await;
    let token = created["token"].as_str().unwrap();

    app.urls.deactivate(token).await.unwrap();

    let response = app.server.get(&format!("/{token}")).await;

    response.assert_status(StatusCode::GONE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "inactive");

    let url = app.urls.find_by_token(token).await.unwrap().unwrap();
    assert_eq!(url.number_of_clicks, 0);
}

#[tokio::test]
async fn test_redirect_expired() {
    let app = common::spawn_app();
    app.urls
        .insert(NewUrl {
            long_url: "https://stale.example.com".to_string(),
            token: "EXP01".to_string(),
            created_by: Uuid::new_v4(),
            expires_at: Utc::now() - Duration::minutes(5),
        })
        .await
        .unwrap();

    let response = app.server.get("/EXP01").await;

    response.assert_status(StatusCode::GONE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");
}

#[tokio::test]
async fn test_redirect_inactive_checked_before_expiry() {
    let app = common::spawn_app();
    app.urls
        .insert(NewUrl {
            long_url: "https://both.example.com".to_string(),
            token: "BOTH1".to_string(),
            created_by: Uuid::new_v4(),
            expires_at: Utc::now() - Duration::minutes(5),
        })
        .await
        .unwrap();
    app.urls.deactivate("BOTH1").await.unwrap();

    let response = app.server.get("/BOTH1").await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "inactive");
}

#[tokio::test]
async fn test_deactivate_requires_session() {
    let app = common::spawn_app();

    let response = app.server.patch("/ABCDE").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_deactivate_unknown_token_is_silent() {
    let app = common::spawn_app();
    let session = common::register_and_login(&app.server, "alice", "pw123").await;

    let response = app
        .server
        .patch("/NOPE1")
        .add_header("Cookie", common::session_cookie(&session))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deactivate_by_another_user() {
    let app = common::spawn_app();
    let alice = common::register_and_login(&app.server, "alice", "pw123").await;
    let bob = common::register_and_login(&app.server, "bob", "pw456").await;
    let created = common::shorten(&app.server, &alice, "https://example.com").await;
    let token = created["token"].as_str().unwrap();

    app.server
        .patch(&format!("/{token}"))
        .add_header("Cookie", common::session_cookie(&bob))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/{token}"))
        .await
        .assert_status(StatusCode::GONE);
}
