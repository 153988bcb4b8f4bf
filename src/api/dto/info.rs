//! Query parameters for the `/info` endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

const DEFAULT_SKIP: i64 = 0;
const DEFAULT_LIMIT: i64 = 20;

/// Query for `GET /info/urls`.
///
/// Bounds are checked by the service; out-of-range values are rejected,
/// not clamped.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UrlListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub skip: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub active_only: Option<bool>,
}

impl UrlListParams {
    /// Returns `(active_only, offset, limit)` with defaults applied.
    pub fn resolve(&self) -> (bool, i64, i64) {
        (
            self.active_only.unwrap_or(false),
            self.skip.unwrap_or(DEFAULT_SKIP),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
