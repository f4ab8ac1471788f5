//! Password hashing via bcrypt.

use thiserror::Error;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// bcrypt reads at most 72 bytes, NUL terminator included.
pub const MAX_PASSWORD_BYTES: usize = 71;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt hash: {0}")]
    Hashing(String),

    #[error("malformed password digest: {0}")]
    MalformedDigest(String),
}

/// Hash a password with bcrypt (cost 10). Inputs of 72 bytes or more are
/// rejected instead of truncated.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::Hashing(format!(
            "password is {} bytes, limit is {MAX_PASSWORD_BYTES}",
            password.len()
        )));
    }
    bcrypt::non_truncating_hash(password, BCRYPT_COST)
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against a bcrypt hash. A mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| match e {
        bcrypt::BcryptError::InvalidHash(_)
        | bcrypt::BcryptError::InvalidPrefix(_)
        | bcrypt::BcryptError::InvalidCost(_)
        | bcrypt::BcryptError::InvalidBase64(_) => PasswordError::MalformedDigest(e.to_string()),
        other => PasswordError::Hashing(other.to_string()),
    })
}
