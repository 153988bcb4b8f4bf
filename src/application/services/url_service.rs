//! URL lifecycle: shortening, redirect resolution, deactivation and listings.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use super::token_allocator::TokenAllocator;
use crate::domain::SiteChecker;
use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::token_generator::is_well_formed;

/// Largest page accepted by [`UrlService::list_tokens`].
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Result of a shortening request.
#[derive(Debug, Clone)]
pub struct Shortened {
    pub short_url: String,
    pub url: Url,
    /// `true` if an existing valid record was returned instead of a new one.
    pub reused: bool,
}

/// Orchestrates the Url record lifecycle.
///
/// At most one active, unexpired record exists per long URL: a request for a
/// long URL whose latest record is still valid returns that record, and an
/// expired record is deactivated in the same transaction that inserts its
/// replacement.
pub struct UrlService<R: UrlRepository + ?Sized, C: SiteChecker + ?Sized> {
    repository: Arc<R>,
    site_checker: Arc<C>,
    allocator: TokenAllocator<R>,
    base_url: String,
    url_ttl: Duration,
}

impl<R: UrlRepository + ?Sized, C: SiteChecker + ?Sized> UrlService<R, C> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - Url record store
    /// - `site_checker` - reachability probe run before shortening
    /// - `base_url` - public address short URLs are formed from
    /// - `url_ttl` - lifetime of a newly issued record
    pub fn new(
        repository: Arc<R>,
        site_checker: Arc<C>,
        base_url: impl Into<String>,
        url_ttl: Duration,
    ) -> Self {
        Self {
            allocator: TokenAllocator::new(repository.clone()),
            repository,
            site_checker,
            base_url: base_url.into(),
            url_ttl,
        }
    }

    /// Shortens `long_url` on behalf of `requester`.
    ///
    /// # Flow
    ///
    /// 1. Reject malformed URLs, then probe the site
    /// 2. Look up the most recent record for `long_url`
    ///    - active and unexpired: return it unchanged
    ///    - expired: deactivate it and insert a replacement atomically
    ///    - unexpired but deactivated, or none: insert a new record
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `long_url` is not an absolute http(s) URL
    /// - [`AppError::InvalidSite`] if the probe fails
    /// - [`AppError::TokenCollision`] if a concurrent request inserted the
    ///   same token first; this is not retried
    pub async fn shorten(&self, long_url: &str, requester: Uuid) -> Result<Shortened, AppError> {
        validate_long_url(long_url)?;
        self.site_checker.check(long_url).await?;

        let now = Utc::now();
        let latest = self.repository.find_by_long_url(long_url).await?;

        if let Some(existing) = &latest {
            if existing.is_valid_at(now) {
                tracing::debug!(token = %existing.token, "Reusing valid short URL");
                return Ok(Shortened {
                    short_url: self.short_url(&existing.token),
                    url: existing.clone(),
                    reused: true,
                });
            }
        }

        let new_url = NewUrl {
            long_url: long_url.to_string(),
            token: self.allocator.allocate().await?,
            created_by: requester,
            expires_at: now + self.url_ttl,
        };

        let url = match latest {
            Some(expired) if expired.is_expired_at(now) => {
                tracing::info!(
                    superseded = %expired.token,
                    token = %new_url.token,
                    "Reissuing expired short URL"
                );
                self.repository.supersede(&expired.token, new_url).await?
            }
            _ => self.repository.insert(new_url).await?,
        };

        tracing::info!(token = %url.token, user_id = %requester, "Short URL created");

        Ok(Shortened {
            short_url: self.short_url(&url.token),
            url,
            reused: false,
        })
    }

    /// Resolves `token` and counts the click.
    ///
    /// The counter is written back as read + 1, so concurrent redirects of the
    /// same token may under-count.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`AppError::UnknownToken`], [`AppError::Inactive`],
    /// [`AppError::Expired`]. Tokens that could never have been issued are
    /// unknown without a store lookup.
    pub async fn redirect(&self, token: &str) -> Result<Url, AppError> {
        if !is_well_formed(token) {
            return Err(AppError::unknown_token(token));
        }

        let mut url = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::unknown_token(token))?;

        if !url.is_active {
            return Err(AppError::Inactive);
        }

        if url.is_expired_at(Utc::now()) {
            return Err(AppError::Expired);
        }

        url.number_of_clicks += 1;
        self.repository
            .set_click_count(token, url.number_of_clicks)
            .await?;

        tracing::debug!(token = %token, clicks = url.number_of_clicks, "Redirect resolved");

        Ok(url)
    }

    /// Deactivates `token`. Unknown tokens succeed silently.
    pub async fn deactivate(&self, token: &str) -> Result<(), AppError> {
        if self.repository.deactivate(token).await? {
            tracing::info!(token = %token, "Short URL deactivated");
        } else {
            tracing::debug!(token = %token, "Deactivate requested for unknown token");
        }

        Ok(())
    }

    /// Lists tokens in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside
    /// `1..=MAX_PAGE_LIMIT` or `offset` is negative.
    pub async fn list_tokens(
        &self,
        active_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<String>, AppError> {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
                json!({ "limit": limit }),
            ));
        }

        if offset < 0 {
            return Err(AppError::bad_request(
                "offset must not be negative",
                json!({ "offset": offset }),
            ));
        }

        self.repository.list_tokens(active_only, offset, limit).await
    }

    /// All records, most clicked first.
    pub async fn list_by_clicks_desc(&self) -> Result<Vec<Url>, AppError> {
        self.repository.list_by_clicks_desc().await
    }

    /// Records created by `owner`, most clicked first.
    pub async fn list_owned_by_clicks_desc(&self, owner: Uuid) -> Result<Vec<Url>, AppError> {
        self.repository.list_by_owner_by_clicks_desc(owner).await
    }

    /// Forms the public short URL for `token`.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), token)
    }

    /// Checks the backing store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
///
/// The raw string is what gets stored and sent back in `Location`, so
/// whitespace and control characters are refused outright; the parser would
/// otherwise strip them silently.
fn validate_long_url(long_url: &str) -> Result<(), AppError> {
    if long_url
        .chars()
        .any(|c| c.is_control() || c.is_whitespace())
    {
        return Err(AppError::bad_request(
            "URL must not contain whitespace or control characters",
            json!({ "url": long_url }),
        ));
    }

    let parsed = url::Url::parse(long_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Only http and https URLs can be shortened",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "URL must have a host",
            json!({ "url": long_url }),
        ));
    }

    Ok(())
}
