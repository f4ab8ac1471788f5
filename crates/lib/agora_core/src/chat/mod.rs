//! Chat message history.
//!
//! Messages are persisted and read back in pages; there is no live fan-out
//! here.

pub mod queries;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
