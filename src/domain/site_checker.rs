//! Port for probing whether a long URL points at a live site.

use async_trait::async_trait;

use crate::error::AppError;

/// Best-effort existence check for a candidate long URL.
///
/// # Errors
///
/// Implementations return [`AppError::InvalidSite`] with a short reason
/// (`"status >= 400"`, `"timeout"`, `"connection error"`) when the site
/// should not be shortened.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteChecker: Send + Sync {
    async fn check(&self, url: &str) -> Result<(), AppError>;
}
