//! Forum database queries.

use async_trait::async_trait;

use super::store::{CommentStore, PostStore};
use crate::db::{PgStore, StoreError};
use crate::models::forum::{Comment, NewComment, NewPost, Post};

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author_id, author_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_id, author_name, created_at, updated_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .bind(&post.author_name)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author_id, author_name, created_at, updated_at
            FROM posts
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author_id, author_name, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, title, content, author_id, author_name, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        // comments.post_id cascades
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, content, author_id, author_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, post_id, content, author_id, author_name, created_at
            "#,
        )
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.author_id)
        .bind(&comment.author_name)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, content, author_id, author_name, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
