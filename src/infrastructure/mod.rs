//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process repository implementations
//! - [`http`] - Outbound site reachability probe

pub mod http;
pub mod memory;
pub mod persistence;
