//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /make_shorter`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Absolute http(s) URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
