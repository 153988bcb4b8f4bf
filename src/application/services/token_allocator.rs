//! Allocation of short tokens not yet present in the store.

use std::sync::Arc;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::token_generator::generate_token;

/// Draws random tokens until one is free in the [`UrlRepository`].
///
/// Allocation does not reserve the token. The caller inserts it afterwards,
/// and a concurrent request may insert the same token in between; the store's
/// unique constraint turns that into [`AppError::TokenCollision`].
pub struct TokenAllocator<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    generate: fn() -> String,
}

impl<R: UrlRepository + ?Sized> TokenAllocator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, generate_token)
    }

    /// Creates an allocator drawing candidates from `generate`.
    pub fn with_generator(repository: Arc<R>, generate: fn() -> String) -> Self {
        Self {
            repository,
            generate,
        }
    }

    /// Returns a token with no matching record.
    ///
    /// Retries without bound, one store lookup per attempt.
    ///
    /// # Errors
    ///
    /// Propagates store lookup failures.
    pub async fn allocate(&self) -> Result<String, AppError> {
        let mut attempts: u32 = 0;

        loop {
            let candidate = (self.generate)();
            attempts += 1;

            if self.repository.find_by_token(&candidate).await?.is_none() {
                if attempts > 1 {
                    tracing::debug!(token = %candidate, attempts, "Token allocated after collisions");
                }
                return Ok(candidate);
            }
        }
    }
}
