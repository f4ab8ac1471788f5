//! Authentication and session logic.
//!
//! Provides password hashing, JWT issuance and validation, the user/session
//! store traits, and [`service::AuthService`], which composes them into
//! register, login and token validation.

pub mod jwt;
pub mod password;
pub mod queries;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::db::StoreError;

/// Authentication errors surfaced by [`service::AuthService`].
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Shared by unknown usernames and wrong passwords.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}
