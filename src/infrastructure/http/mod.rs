//! Outbound HTTP integrations.

pub mod reachability;

pub use reachability::ReqwestSiteChecker;
