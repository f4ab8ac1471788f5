//! Forum posts and comments.

pub mod queries;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::db::StoreError;

/// Forum errors.
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
