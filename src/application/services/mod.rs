//! Business logic services for the application layer.

pub mod auth_service;
pub mod token_allocator;
pub mod url_service;

pub use auth_service::AuthService;
pub use token_allocator::TokenAllocator;
pub use url_service::{Shortened, UrlService};
