//! Short token generation.
//!
//! Tokens are drawn uniformly from `A-Z0-9` with a fixed length of
//! [`TOKEN_LENGTH`], giving 36^5 (about 60 million) distinct values.

use rand::Rng;

/// Alphabet a short token is drawn from.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a short token.
pub const TOKEN_LENGTH: usize = 5;

/// Generates a random candidate token.
///
/// The result is not checked against the store; see
/// [`crate::application::services::TokenAllocator`] for that.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token();
/// assert_eq!(token.len(), 5);
/// assert!(token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns `true` if `token` has the shape of a generated token.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| TOKEN_ALPHABET.contains(&b))
}
