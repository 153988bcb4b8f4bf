//! In-process repository implementations backed by `DashMap`.
//!
//! They keep the same uniqueness rules as the Postgres schema and are used
//! by the test suites and for running the service without a database.

pub mod url_repository;
pub mod user_repository;

pub use url_repository::InMemoryUrlRepository;
pub use user_repository::InMemoryUserRepository;
