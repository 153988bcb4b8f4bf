//! Credential service: registration, login and session token validation.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session_token::SessionKeys;

/// Service for user accounts and signed session tokens.
///
/// Passwords are stored as salted Argon2 hashes. Session tokens are HS256
/// JWTs carrying the user id and an expiry; validating one also checks the
/// user still exists.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    keys: SessionKeys,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user store
    /// - `keys` - session signing key and lifetime
    pub fn new(repository: Arc<R>, keys: SessionKeys) -> Self {
        Self { repository, keys }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserExists`] if `username` is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        if self.repository.find_by_username(username).await?.is_some() {
            return Err(AppError::UserExists);
        }

        let user = self
            .repository
            .create(NewUser {
                username: username.to_string(),
                hashed_password: hash_password(password)?,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Checks a username/password pair.
    ///
    /// Returns `None` when the user is unknown or the password does not match.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.hashed_password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Authenticates and issues a session token in one step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] on any mismatch.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .authenticate(username, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = self.issue_session_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    pub fn issue_session_token(&self, user: &User) -> Result<String, AppError> {
        self.keys.sign(user.id)
    }

    /// Resolves a session token to its user.
    ///
    /// # Errors
    ///
    /// - [`AppError::TokenExpired`] if the token's expiry has passed
    /// - [`AppError::InvalidToken`] if it fails verification or the user is gone
    pub async fn validate_session_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.keys.verify(token)?;

        self.repository
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    /// Lifetime of issued session tokens.
    pub fn session_ttl(&self) -> chrono::Duration {
        self.keys.ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", Duration::minutes(30))
    }

    fn stored_user(username: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            hashed_password: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|new_user| new_user.username == "alice" && new_user.hashed_password != "pw123")
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    username: new_user.username,
                    hashed_password: new_user.hashed_password,
                    created_at: Utc::now(),
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), keys());
        let user = service.register("alice", "pw123").await.unwrap();

        assert!(verify_password("pw123", &user.hashed_password).unwrap());
    }

    #[tokio::test]
    async fn test_register_existing_username() {
        let mut mock_repo = MockUserRepository::new();
        let existing = stored_user("alice", "pw123");
        mock_repo
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().times(0);

        let service = AuthService::new(Arc::new(mock_repo), keys());
        let result = service.register("alice", "other").await;

        assert!(matches!(result, Err(AppError::UserExists)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let existing = stored_user("alice", "pw123");
        mock_repo
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(mock_repo), keys());

        assert!(service.authenticate("alice", "nope").await.unwrap().is_none());
        assert!(matches!(
            service.login("alice", "nope").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_username().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), keys());

        assert!(matches!(
            service.login("ghost", "pw123").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_token_resolves_to_user() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("alice", "pw123");
        let user_id = user.id;
        let by_name = user.clone();
        mock_repo
            .expect_find_by_username()
            .returning(move |_| Ok(Some(by_name.clone())));
        mock_repo
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), keys());
        let token = service.login("alice", "pw123").await.unwrap();
        let resolved = service.validate_session_token(&token).await.unwrap();

        assert_eq!(resolved.id, user_id);
    }

    #[tokio::test]
    async fn test_validate_token_for_deleted_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), keys());
        let token = keys().sign(Uuid::new_v4()).unwrap();

        assert!(matches!(
            service.validate_session_token(&token).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_validate_expired_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(mock_repo), keys());
        let expired = SessionKeys::new("test-secret", Duration::minutes(-1))
            .sign(Uuid::new_v4())
            .unwrap();

        assert!(matches!(
            service.validate_session_token(&expired).await,
            Err(AppError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_validate_malformed_token() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), keys());

        assert!(matches!(
            service.validate_session_token("garbage").await,
            Err(AppError::InvalidToken)
        ));
    }
}
