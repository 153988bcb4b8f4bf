//! User entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account.
///
/// Users are never mutated after registration. Deleting a user cascades to
/// every [`super::Url`] they created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
}
