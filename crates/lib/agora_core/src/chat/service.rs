//! Chat service: post and page through persisted messages.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ChatError;
use super::store::MessageStore;
use crate::auth::store::UserStore;
use crate::models::auth::Principal;
use crate::models::chat::{ChatMessage, NewChatMessage};

/// Maximum message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;
/// Page size when the caller gives none.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
/// Largest page a caller may ask for.
pub const MAX_HISTORY_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct ChatService {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
}

impl ChatService {
    pub fn new(messages: Arc<dyn MessageStore>, users: Arc<dyn UserStore>) -> Self {
        Self { messages, users }
    }

    pub async fn post_message(
        &self,
        principal: &Principal,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::Validation("message is empty".into()));
        }
        if content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ChatError::Validation(format!(
                "message exceeds {MAX_MESSAGE_CHARS} characters"
            )));
        }

        let username = match self.users.get_user_by_id(principal.user_id).await? {
            Some(user) => user.username,
            None => {
                warn!(user_id = principal.user_id, "chat message from unknown user");
                return Err(ChatError::Validation("unknown user".into()));
            }
        };

        let message = self
            .messages
            .save_message(NewChatMessage {
                user_id: principal.user_id,
                username,
                content: content.to_string(),
            })
            .await?;
        debug!(message_id = message.id, user_id = message.user_id, "chat message saved");
        Ok(message)
    }

    /// Latest messages in chronological order. `limit` is clamped to
    /// `1..=MAX_HISTORY_LIMIT`.
    pub async fn recent_messages(&self, limit: Option<i64>) -> Result<Vec<ChatMessage>, ChatError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);
        Ok(self.messages.recent_messages(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::auth::{NewUser, ROLE_USER};

    async fn setup() -> (ChatService, Principal) {
        let store = Arc::new(MemoryStore::new());
        let id = store
            .create_user(NewUser {
                username: "alice".into(),
                password_hash: "x".into(),
                role: ROLE_USER.into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let principal = Principal {
            user_id: id,
            role: ROLE_USER.into(),
        };
        (ChatService::new(store.clone(), store), principal)
    }

    #[tokio::test]
    async fn message_carries_username() {
        let (chat, alice) = setup().await;
        let msg = chat.post_message(&alice, "  hello  ").await.unwrap();
        assert_eq!(msg.username, "alice");
        assert_eq!(msg.content, "hello");
    }

    #[tokio::test]
    async fn empty_and_oversize_messages_are_rejected() {
        let (chat, alice) = setup().await;
        assert!(matches!(
            chat.post_message(&alice, " ").await,
            Err(ChatError::Validation(_))
        ));
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            chat.post_message(&alice, &long).await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_sender_is_rejected() {
        let (chat, _) = setup().await;
        let ghost = Principal {
            user_id: 77,
            role: ROLE_USER.into(),
        };
        assert!(matches!(
            chat.post_message(&ghost, "boo").await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn history_is_clamped_and_chronological() {
        let (chat, alice) = setup().await;
        for i in 0..3 {
            chat.post_message(&alice, &format!("m{i}")).await.unwrap();
        }
        let all = chat.recent_messages(None).await.unwrap();
        let contents: Vec<_> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m0", "m1", "m2"]);

        let one = chat.recent_messages(Some(0)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].content, "m2");
    }
}
