//! Shared application state injected into every handler.

use std::sync::Arc;

use chrono::Duration;

use crate::application::services::{AuthService, UrlService};
use crate::config::Config;
use crate::domain::SiteChecker;
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::utils::session_token::SessionKeys;

pub type SharedUrlService = UrlService<dyn UrlRepository, dyn SiteChecker>;
pub type SharedAuthService = AuthService<dyn UserRepository>;

/// Settings the services need from [`Config`].
#[derive(Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub url_ttl: Duration,
    pub session_keys: SessionKeys,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            url_ttl: config.url_ttl(),
            session_keys: SessionKeys::new(&config.secret_key, config.session_ttl()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<SharedUrlService>,
    pub auth_service: Arc<SharedAuthService>,
}

impl AppState {
    /// Wires the services over the given store and site checker.
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        user_repository: Arc<dyn UserRepository>,
        site_checker: Arc<dyn SiteChecker>,
        settings: ServiceSettings,
    ) -> Self {
        let url_service = UrlService::new(
            url_repository,
            site_checker,
            settings.base_url,
            settings.url_ttl,
        );
        let auth_service = AuthService::new(user_repository, settings.session_keys);

        Self {
            url_service: Arc::new(url_service),
            auth_service: Arc::new(auth_service),
        }
    }
}
