//! Password hashing (Argon2) and the registration strength policy.

use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::error::AuthError;

/// Registration/seller-creation password policy: at least 8 characters with
/// one uppercase, one lowercase, one digit and one symbol.
pub fn validate_strength(plain: &str) -> Result<(), AuthError> {
    if plain.chars().count() < 8 {
        return Err(AuthError::WeakPassword("must be at least 8 characters"));
    }
    if !plain.chars().any(|c| c.is_uppercase()) {
        return Err(AuthError::WeakPassword("must contain an uppercase letter"));
    }
    if !plain.chars().any(|c| c.is_lowercase()) {
        return Err(AuthError::WeakPassword("must contain a lowercase letter"));
    }
    if !plain.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword("must contain a digit"));
    }
    if !plain.chars().any(|c| !c.is_alphanumeric()) {
        return Err(AuthError::WeakPassword("must contain a symbol"));
    }
    Ok(())
}

/// Hash a password with Argon2 and a fresh random salt.
///
/// Does not apply the strength policy; callers decide where the policy
/// holds (registration does, super-admin bootstrap does not).
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("argon2 hash: {e}")))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| AuthError::Crypto(format!("bad password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
