//! Chat message store trait.

use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::chat::{ChatMessage, NewChatMessage};

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// The latest `limit` messages, oldest first.
    async fn recent_messages(&self, limit: i64) -> Result<Vec<ChatMessage>, StoreError>;
}
