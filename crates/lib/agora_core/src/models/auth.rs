//! Authentication domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag for administrators.
pub const ROLE_ADMIN: &str = "admin";
/// Role tag assigned to every self-registered account.
pub const ROLE_USER: &str = "user";

/// Domain user. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Open role tag; see [`ROLE_ADMIN`] and [`ROLE_USER`].
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// User with password digest (for internal auth flows).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Insert payload for a new user. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Issued login session.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub role: String,
    /// Display name at issuance time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    #[serde(default)]
    pub iat: i64,
    /// Per-issuance nonce; keeps tokens minted in the same second distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Outcome of token validation. `valid == false` carries zeroed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenVerdict {
    pub valid: bool,
    pub user_id: i64,
    pub role: String,
}

impl TokenVerdict {
    pub fn invalid() -> Self {
        Self::default()
    }

    /// The authenticated caller, if the token was valid.
    pub fn principal(&self) -> Option<Principal> {
        self.valid.then(|| Principal {
            user_id: self.user_id,
            role: self.role.clone(),
        })
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub username: String,
}

/// Authenticated caller, as established from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether this caller may modify a resource authored by `author_id`.
    pub fn can_modify(&self, author_id: i64) -> bool {
        self.user_id == author_id || self.is_admin()
    }
}
