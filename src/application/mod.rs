//! Application layer services implementing business logic.
//!
//! Services consume the repository traits and the site checker port and give
//! HTTP handlers and the admin CLI a single API to call.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Shortening, redirects, deactivation, listings
//! - [`services::token_allocator::TokenAllocator`] - Free short token allocation
//! - [`services::auth_service::AuthService`] - Registration, login, session tokens

pub mod services;
