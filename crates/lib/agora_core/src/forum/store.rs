//! Post and comment store traits.

use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::forum::{Comment, NewComment, NewPost, Post};

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Replace title and content; `None` if the post does not exist.
    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, StoreError>;

    /// Delete a post and its comments. Returns whether a row was removed.
    async fn delete_post(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// Comments on a post, newest first.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError>;
}
