//! Url entity: one shortening of one long URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A shortened URL record.
///
/// The `token` is unique across all records and never reused while the record
/// exists. `number_of_clicks` only ever grows. Once `is_active` is cleared the
/// record is never reactivated; re-shortening the same long URL creates a new
/// record instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    pub id: Uuid,
    pub long_url: String,
    pub token: String,
    pub created_by: Uuid,
    pub number_of_clicks: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Url {
    /// Returns true once `expires_at` lies strictly in the past.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Active and not yet expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }
}

/// Input data for inserting a new Url record.
///
/// New records always start active with zero clicks.
#[derive(Debug, Clone)]
pub struct NewUrl {
    pub long_url: String,
    pub token: String,
    pub created_by: Uuid,
    pub expires_at: DateTime<Utc>,
}
