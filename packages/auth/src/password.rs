//! # Password hashing and verification (Argon2id)
//!
//! - [`hash_password`] draws a random salt from [`OsRng`] and returns a PHC-format
//!   string (`$argon2id$v=19$...`) which embeds the salt and parameters. That string is
//!   what lands in `users.password_hash`.
//! - [`verify_password`] parses a stored PHC string and checks a candidate against it.
//!   `Ok(false)` means mismatch; `Err` means the stored hash itself is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AuthError, Result};

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
