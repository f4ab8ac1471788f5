//! Authentication middleware: Bearer token extraction and validation.

use agora_core::models::auth::Principal;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Key used to store the caller's [`Principal`] in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// Axum middleware: extracts `Authorization: Bearer <token>`, validates it,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let principal = state.auth.validate_token(token).principal().ok_or_else(|| {
        debug!("rejected bearer token");
        AppError::Unauthorized("Invalid or expired token".into())
    })?;

    request.extensions_mut().insert(AuthenticatedUser(principal));

    Ok(next.run(request).await)
}
