//! Domain layer: entities, storage contracts and external ports.
//!
//! - [`entities`] - User and Url records
//! - [`repositories`] - storage traits implemented by `crate::infrastructure`
//! - [`site_checker`] - the reachability probe consulted before shortening
//!
//! Nothing in here depends on HTTP or on a concrete database.

pub mod entities;
pub mod repositories;
pub mod site_checker;

pub use site_checker::SiteChecker;
