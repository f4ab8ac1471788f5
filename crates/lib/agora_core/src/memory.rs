//! In-process store implementing every store trait.
//!
//! Used by tests and by local runs without PostgreSQL. Ids are assigned from
//! per-table counters starting at 1, like `BIGSERIAL`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::store::{SessionStore, UserStore};
use crate::chat::store::MessageStore;
use crate::db::StoreError;
use crate::forum::store::{CommentStore, PostStore};
use crate::models::auth::{NewUser, Session, User, UserWithPassword};
use crate::models::chat::{ChatMessage, NewChatMessage};
use crate::models::forum::{Comment, NewComment, NewPost, Post};

#[derive(Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    sessions: HashMap<String, Session>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    messages: Vec<ChatMessage>,
    user_seq: i64,
    post_seq: i64,
    comment_seq: i64,
    message_seq: i64,
}

/// Memory-backed store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's role tag. Returns false if the user does not exist.
    pub async fn set_role(&self, user_id: i64, role: &str) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.user.id == user_id) {
            Some(u) => {
                u.user.role = role.to_string();
                true
            }
            None => false,
        }
    }
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user.username == user.username) {
            return Err(StoreError::Conflict("users_username_key".into()));
        }
        let id = next_id(&mut tables.user_seq);
        tables.users.push(UserWithPassword {
            user: User {
                id,
                username: user.username,
                role: user.role,
                created_at: user.created_at,
            },
            password_hash: user.password_hash,
        });
        Ok(id)
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.username == username)
            .cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.sessions.contains_key(&session.token) {
            return Err(StoreError::Conflict("sessions_token_key".into()));
        }
        tables
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get_session_by_token(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.get(token).cloned())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.post_seq);
        let now = Utc::now();
        let row = Post {
            id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            author_name: post.author_name,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(row.clone());
        Ok(row)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().rev().cloned().collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.title = title.to_string();
            p.content = content.to_string();
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        let deleted = tables.posts.len() != before;
        if deleted {
            tables.comments.retain(|c| c.post_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.comment_seq);
        let row = Comment {
            id,
            post_id: comment.post_id,
            content: comment.content,
            author_id: comment.author_id,
            author_name: comment.author_name,
            created_at: Utc::now(),
        };
        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.message_seq);
        let row = ChatMessage {
            id,
            user_id: message.user_id,
            username: message.username,
            content: message.content,
            created_at: Utc::now(),
        };
        tables.messages.push(row.clone());
        Ok(row)
    }

    async fn recent_messages(&self, limit: i64) -> Result<Vec<ChatMessage>, StoreError> {
        let tables = self.tables.read().await;
        let skip = tables.messages.len().saturating_sub(limit.max(0) as usize);
        Ok(tables.messages[skip..].to_vec())
    }
}
