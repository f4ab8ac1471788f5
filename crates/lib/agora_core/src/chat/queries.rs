//! Chat database queries.

use async_trait::async_trait;

use super::store::MessageStore;
use crate::db::{PgStore, StoreError};
use crate::models::chat::{ChatMessage, NewChatMessage};

#[async_trait]
impl MessageStore for PgStore {
    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let row = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (user_id, username, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, username, content, created_at
            "#,
        )
        .bind(message.user_id)
        .bind(&message.username)
        .bind(&message.content)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn recent_messages(&self, limit: i64) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, username, content, created_at
            FROM (
                SELECT id, user_id, username, content, created_at
                FROM chat_messages
                ORDER BY id DESC
                LIMIT $1
            ) recent
            ORDER BY id ASC
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
