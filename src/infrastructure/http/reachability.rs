//! Site reachability probe over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use serde_json::json;

use crate::domain::SiteChecker;
use crate::error::AppError;

/// Probes a URL with a single GET request.
///
/// Redirects are not followed and certificates are not validated: the probe
/// only asks whether something answers at that address with a status below
/// 400.
#[derive(Debug, Clone)]
pub struct ReqwestSiteChecker {
    client: Client,
}

impl ReqwestSiteChecker {
    /// Builds a checker whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SiteChecker for ReqwestSiteChecker {
    async fn check(&self, url: &str) -> Result<(), AppError> {
        match self.client.get(url).send().await {
            Ok(response) if response.status().as_u16() < 400 => Ok(()),
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "Site rejected");
                Err(AppError::invalid_site("status >= 400"))
            }
            Err(e) if e.is_timeout() => {
                tracing::debug!(url = %url, "Site probe timed out");
                Err(AppError::invalid_site("timeout"))
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Site probe failed");
                Err(AppError::invalid_site("connection error"))
            }
        }
    }
}
