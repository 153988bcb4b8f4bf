//! PostgreSQL implementation of the Url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const URL_COLUMNS: &str =
    "id, long_url, token, created_by, number_of_clicks, is_active, created_at, expires_at";

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: Uuid,
    long_url: String,
    token: String,
    created_by: Uuid,
    number_of_clicks: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<UrlRow> for Url {
    fn from(r: UrlRow) -> Self {
        Url {
            id: r.id,
            long_url: r.long_url,
            token: r.token,
            created_by: r.created_by,
            number_of_clicks: r.number_of_clicks,
            is_active: r.is_active,
            created_at: r.created_at,
            expires_at: r.expires_at,
        }
    }
}

/// PostgreSQL repository for Url records.
///
/// Token uniqueness is enforced by the `url_token_key` constraint.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn insert_in(
        tx: &mut Transaction<'_, Postgres>,
        new_url: &NewUrl,
    ) -> Result<Url, AppError> {
        let sql = format!(
            "INSERT INTO url (long_url, token, created_by, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING {URL_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(&new_url.long_url)
            .bind(&new_url.token)
            .bind(new_url.created_by)
            .bind(new_url.expires_at)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| with_token(AppError::from(e), &new_url.token))?;

        Ok(row.into())
    }
}

/// Fills in the colliding token, which the constraint error does not carry.
fn with_token(err: AppError, token: &str) -> AppError {
    match err {
        AppError::TokenCollision { .. } => AppError::TokenCollision {
            token: token.to_string(),
        },
        other => other,
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<Url, AppError> {
        let mut tx = self.pool.begin().await?;
        let url = Self::insert_in(&mut tx, &new_url).await?;
        tx.commit().await?;

        Ok(url)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Url>, AppError> {
        let sql = format!("SELECT {URL_COLUMNS} FROM url WHERE token = $1");

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(token)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Url>, AppError> {
        let sql = format!(
            "SELECT {URL_COLUMNS} FROM url WHERE long_url = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(long_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn set_click_count(&self, token: &str, clicks: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE url SET number_of_clicks = $2 WHERE token = $1")
            .bind(token)
            .bind(clicks)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn deactivate(&self, token: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE url SET is_active = FALSE WHERE token = $1")
            .bind(token)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn supersede(&self, superseded_token: &str, new_url: NewUrl) -> Result<Url, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE url SET is_active = FALSE WHERE token = $1")
            .bind(superseded_token)
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction on error rolls the deactivation back.
        let url = Self::insert_in(&mut tx, &new_url).await?;
        tx.commit().await?;

        Ok(url)
    }

    async fn list_tokens(
        &self,
        active_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<String>, AppError> {
        let tokens = sqlx::query_scalar::<_, String>(
            r#"
            SELECT token FROM url
            WHERE ($1 = FALSE OR is_active)
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(active_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(tokens)
    }

    async fn list_by_clicks_desc(&self) -> Result<Vec<Url>, AppError> {
        let sql = format!(
            "SELECT {URL_COLUMNS} FROM url ORDER BY number_of_clicks DESC, created_at, id"
        );

        let rows = sqlx::query_as::<_, UrlRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner_by_clicks_desc(&self, owner: Uuid) -> Result<Vec<Url>, AppError> {
        let sql = format!(
            "SELECT {URL_COLUMNS} FROM url WHERE created_by = $1 \
             ORDER BY number_of_clicks DESC, created_at, id"
        );

        let rows = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(owner)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
