//! Application error types.

use agora_core::auth::AuthError;
use agora_core::chat::ChatError;
use agora_core::db::StoreError;
use agora_core::forum::ForumError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(what) => AppError::Conflict(what),
            StoreError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized(AuthError::InvalidCredentials.to_string())
            }
            AuthError::Hashing(_) => AppError::Validation("password too long".into()),
            AuthError::Persistence(StoreError::Conflict(_)) => {
                AppError::Conflict("username already taken".into())
            }
            AuthError::Persistence(e) => AppError::from(e),
            AuthError::UserNotFound => AppError::NotFound("user not found".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ForumError> for AppError {
    fn from(e: ForumError) -> Self {
        match e {
            ForumError::NotFound(msg) => AppError::NotFound(msg),
            ForumError::Forbidden(msg) => AppError::Forbidden(msg),
            ForumError::Validation(msg) => AppError::Validation(msg),
            ForumError::Store(e) => AppError::from(e),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::Store(e) => AppError::from(e),
        }
    }
}
