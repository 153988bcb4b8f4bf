//! Repository trait for short URL records.

use crate::domain::entities::{NewUrl, Url};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage contract for [`Url`] records.
///
/// Token uniqueness is enforced here: inserting a token that already exists
/// fails with [`AppError::TokenCollision`]. `long_url` is deliberately not
/// unique, since superseded records stay behind deactivated.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::memory::InMemoryUrlRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new active record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TokenCollision`] if the token is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_url: NewUrl) -> Result<Url, AppError>;

    /// Finds a record by its token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Url>, AppError>;

    /// Finds the most recently created record for `long_url`.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Url>, AppError>;

    /// Overwrites the click counter of the record with `token`.
    ///
    /// This is a plain write of a value the caller computed, not an atomic
    /// increment: concurrent writers race and the last one wins.
    async fn set_click_count(&self, token: &str, clicks: i64) -> Result<(), AppError>;

    /// Clears `is_active`. Returns `false` if no record has this token.
    async fn deactivate(&self, token: &str) -> Result<bool, AppError>;

    /// Deactivates `superseded_token` and inserts `new_url` as one atomic step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::insert`]; on error neither change is applied.
    async fn supersede(&self, superseded_token: &str, new_url: NewUrl) -> Result<Url, AppError>;

    /// Lists tokens in insertion order, optionally only active ones.
    async fn list_tokens(
        &self,
        active_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<String>, AppError>;

    /// Lists every record, most clicked first.
    async fn list_by_clicks_desc(&self) -> Result<Vec<Url>, AppError>;

    /// Lists the records created by `owner`, most clicked first.
    async fn list_by_owner_by_clicks_desc(&self, owner: Uuid) -> Result<Vec<Url>, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
