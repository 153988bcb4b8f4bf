//! Core domain entities.
//!
//! - [`User`] - a registered account
//! - [`Url`] - a shortened URL owned by a user
//!
//! Creation inputs live in separate `New*` structs so that store-assigned
//! fields (`id`, timestamps, counters) never have to be invented by callers.

pub mod url;
pub mod user;

pub use url::{NewUrl, Url};
pub use user::{NewUser, User};
