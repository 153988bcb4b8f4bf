//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Url records are serialized straight from the
//! domain entity.

pub mod health;
pub mod info;
pub mod shorten;
pub mod users;
