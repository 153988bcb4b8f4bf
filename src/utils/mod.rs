//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Random short token generation
//! - [`password`] - Argon2 password hashing
//! - [`session_token`] - Signed session token issuing and verification
//! - [`db_error`] - Postgres constraint-violation helpers

pub mod db_error;
pub mod password;
pub mod session_token;
pub mod token_generator;
