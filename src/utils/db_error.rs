//! Helpers for classifying database errors.

/// Unique constraint guarding `url.token`.
pub const TOKEN_CONSTRAINT: &str = "url_token_key";

/// Unique constraint guarding `"user".username`.
pub const USERNAME_CONSTRAINT: &str = "user_username_key";

/// Returns the violated constraint name if `e` is a unique violation.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint().map(str::to_owned)
}
