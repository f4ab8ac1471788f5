//! Chat history handlers.

use agora_core::models::chat::ChatMessage;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ContentRequest, HistoryQuery, MessagesResponse};

/// `GET /api/v1/chat/messages?limit=N`: latest messages, oldest first.
pub async fn list_messages_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<MessagesResponse>> {
    let messages = state.chat.recent_messages(query.limit).await?;
    Ok(Json(MessagesResponse { messages }))
}

/// `POST /api/v1/chat/messages`
pub async fn post_message_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Json(body): Json<ContentRequest>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    let message = state.chat.post_message(&principal, &body.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
