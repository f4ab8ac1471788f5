//! JWT token issuance and verification.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::auth::TokenClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("jwt encode: {0}")]
    Encode(String),

    #[error("token lifetime out of range")]
    TtlOutOfRange,
}

/// Length of the random `jti` nonce.
const JTI_LEN: usize = 22;

/// Issue a signed HS256 token carrying `user_id` and `role`, valid for `ttl`.
pub fn issue_token(
    user_id: i64,
    role: &str,
    username: &str,
    secret: &[u8],
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(ttl)
        .ok_or(TokenError::TtlOutOfRange)?;
    let claims = TokenClaims {
        user_id,
        role: role.to_string(),
        username: Some(username.to_string()),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Some(random_string(JTI_LEN)),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Verify signature and expiry, returning the claims on success.
pub fn parse_token(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(e.to_string()),
        })
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret = random_string(64);
    match persist_secret(&secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            error = %e,
            "JWT secret not persisted; tokens will not survive a restart"
        ),
    }
    secret
}

fn persist_secret(path: &Path, secret: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, secret)
}

fn random_string(len: usize) -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agora")
        .join("jwt-secret")
}
