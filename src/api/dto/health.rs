//! Response body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// The service only depends on its store.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: StoreStatus,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    /// `ok` or `error`.
    pub status: &'static str,
    pub message: String,
}

impl StoreStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
