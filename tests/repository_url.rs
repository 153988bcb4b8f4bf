//! PostgreSQL Url store. Needs `DATABASE_URL`; run with `--ignored`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shorturl::domain::entities::{NewUrl, NewUser};
use shorturl::domain::repositories::{UrlRepository, UserRepository};
use shorturl::error::AppError;
use shorturl::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use uuid::Uuid;

async fn create_owner(pool: &Arc<PgPool>, username: &str) -> Uuid {
    PgUserRepository::new(pool.clone())
        .create(NewUser {
            username: username.to_string(),
            hashed_password: "hash".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn new_url(long_url: &str, token: &str, owner: Uuid) -> NewUrl {
    NewUrl {
        long_url: long_url.to_string(),
        token: token.to_string(),
        created_by: owner,
        expires_at: Utc::now() + Duration::hours(24),
    }
}

#[sqlx::test]
#[ignore]
async fn test_insert_and_find(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgUrlRepository::new(pool);

    let url = repo
        .insert(new_url("https://example.com", "AB12C", owner))
        .await
        .unwrap();

    assert_eq!(url.token, "AB12C");
    assert_eq!(url.number_of_clicks, 0);
    assert!(url.is_active);

    let found = repo.find_by_token("AB12C").await.unwrap().unwrap();
    assert_eq!(found.id, url.id);
    assert!(repo.find_by_token("ZZZZZ").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore]
async fn test_duplicate_token_is_collision(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgUrlRepository::new(pool);

    repo.insert(new_url("https://a.com", "SAME1", owner))
        .await
        .unwrap();
    let result = repo.insert(new_url("https://b.com", "SAME1", owner)).await;

    match result {
        Err(AppError::TokenCollision { token }) => assert_eq!(token, "SAME1"),
        other => panic!("expected token collision, got {other:?}"),
    }
}

#[sqlx::test]
#[ignore]
async fn test_click_count_and_deactivate(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgUrlRepository::new(pool);

    repo.insert(new_url("https://example.com", "CLK01", owner))
        .await
        .unwrap();

    repo.set_click_count("CLK01", 7).await.unwrap();
    assert!(repo.deactivate("CLK01").await.unwrap());
    assert!(!repo.deactivate("MISSN").await.unwrap());

    let url = repo.find_by_token("CLK01").await.unwrap().unwrap();
    assert_eq!(url.number_of_clicks, 7);
    assert!(!url.is_active);
}

#[sqlx::test]
#[ignore]
async fn test_supersede_replaces_latest(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgUrlRepository::new(pool);

    let mut expired = new_url("https://example.com", "OLD01", owner);
    expired.expires_at = Utc::now() - Duration::hours(1);
    repo.insert(expired).await.unwrap();

    let fresh = repo
        .supersede("OLD01", new_url("https://example.com", "NEW01", owner))
        .await
        .unwrap();
    assert_eq!(fresh.token, "NEW01");

    let old = repo.find_by_token("OLD01").await.unwrap().unwrap();
    assert!(!old.is_active);

    let latest = repo
        .find_by_long_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.token, "NEW01");
}

#[sqlx::test]
#[ignore]
async fn test_list_tokens_pagination(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgUrlRepository::new(pool);

    for (i, token) in ["TOK01", "TOK02", "TOK03"].iter().enumerate() {
        repo.insert(new_url(&format!("https://example.com/{i}"), token, owner))
            .await
            .unwrap();
    }
    repo.deactivate("TOK01").await.unwrap();

    assert_eq!(
        repo.list_tokens(false, 0, 10).await.unwrap(),
        vec!["TOK01", "TOK02", "TOK03"]
    );
    assert_eq!(repo.list_tokens(false, 1, 1).await.unwrap(), vec!["TOK02"]);
    assert_eq!(
        repo.list_tokens(true, 0, 10).await.unwrap(),
        vec!["TOK02", "TOK03"]
    );
}

#[sqlx::test]
#[ignore]
async fn test_list_by_clicks(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgUrlRepository::new(pool);

    repo.insert(new_url("https://a.com", "AAAAA", alice))
        .await
        .unwrap();
    repo.insert(new_url("https://b.com", "BBBBB", bob))
        .await
        .unwrap();
    repo.set_click_count("BBBBB", 3).await.unwrap();

    let all = repo.list_by_clicks_desc().await.unwrap();
    let tokens: Vec<_> = all.iter().map(|u| u.token.as_str()).collect();
    assert_eq!(tokens, vec!["BBBBB", "AAAAA"]);

    let mine = repo.list_by_owner_by_clicks_desc(alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].token, "AAAAA");
}

#[sqlx::test]
#[ignore]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
#[ignore]
async fn test_find_by_long_url_breaks_created_at_ties_by_id(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let created_at = Utc::now() - Duration::minutes(10);
    let expires_at = created_at + Duration::hours(24);

    for (id, token) in [
        ("00000000-0000-0000-0000-000000000001", "TIE01"),
        ("00000000-0000-0000-0000-000000000002", "TIE02"),
    ] {
        sqlx::query(
            "INSERT INTO url (id, long_url, token, created_by, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::parse_str(id).unwrap())
        .bind("https://tie.example.com")
        .bind(token)
        .bind(owner)
        .bind(created_at)
        .bind(expires_at)
        .execute(pool.as_ref())
        .await
        .unwrap();
    }

    let repo = PgUrlRepository::new(pool);
    let latest = repo
        .find_by_long_url("https://tie.example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(latest.token, "TIE02");
}
