//! Forum domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Forum post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
}

/// Comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
}
