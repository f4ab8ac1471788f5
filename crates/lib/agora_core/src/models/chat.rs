//! Chat domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a chat message.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: i64,
    pub username: String,
    pub content: String,
}
