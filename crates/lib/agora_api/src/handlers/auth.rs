//! Authentication request handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{
    CredentialsRequest, LoginResponse, RegisterResponse, UserResponse, ValidateTokenRequest,
    ValidateTokenResponse,
};

/// `POST /api/v1/auth/register`: create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let user_id = state.auth.register(&body.username, &body.password).await?;
    Ok(Json(RegisterResponse { user_id }))
}

/// `POST /api/v1/auth/login`: authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state.auth.login(&body.username, &body.password).await?;
    Ok(Json(LoginResponse {
        token: outcome.token,
        username: outcome.username,
    }))
}

/// `POST /api/v1/auth/validate`: check a token. Always 200; see `valid`.
pub async fn validate_token_handler(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenRequest>,
) -> Json<ValidateTokenResponse> {
    let verdict = state.auth.validate_token(&body.token);
    Json(ValidateTokenResponse {
        valid: verdict.valid,
        user_id: verdict.user_id,
        role: verdict.role,
    })
}

/// `GET /api/v1/auth/user/{id}`: public profile of a user.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth.get_user(id).await?;
    Ok(Json(user.into()))
}
