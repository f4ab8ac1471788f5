//! Forum service: post and comment operations with author checks.

use std::sync::Arc;

use tracing::{info, warn};

use super::ForumError;
use super::store::{CommentStore, PostStore};
use crate::auth::store::UserStore;
use crate::models::auth::Principal;
use crate::models::forum::{Comment, NewComment, NewPost, Post};

/// Shown when the author's account cannot be resolved.
const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Clone)]
pub struct ForumService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
    users: Arc<dyn UserStore>,
}

fn required(field: &str, value: &str) -> Result<String, ForumError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ForumError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl ForumService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        comments: Arc<dyn CommentStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
        }
    }

    async fn author_name(&self, user_id: i64) -> String {
        match self.users.get_user_by_id(user_id).await {
            Ok(Some(user)) => user.username,
            Ok(None) => UNKNOWN_AUTHOR.to_string(),
            Err(e) => {
                warn!(user_id, error = %e, "author lookup failed");
                UNKNOWN_AUTHOR.to_string()
            }
        }
    }

    pub async fn create_post(
        &self,
        principal: &Principal,
        title: &str,
        content: &str,
    ) -> Result<Post, ForumError> {
        let title = required("title", title)?;
        let content = required("content", content)?;
        let author_name = self.author_name(principal.user_id).await;

        let post = self
            .posts
            .create_post(NewPost {
                title,
                content,
                author_id: principal.user_id,
                author_name,
            })
            .await?;
        info!(post_id = post.id, author_id = post.author_id, "post created");
        Ok(post)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ForumError> {
        Ok(self.posts.list_posts().await?)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ForumError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| ForumError::NotFound(format!("post {id}")))
    }

    /// Load a post and check that `principal` is its author or an admin.
    async fn owned_post(&self, principal: &Principal, id: i64) -> Result<Post, ForumError> {
        let post = self.get_post(id).await?;
        if !principal.can_modify(post.author_id) {
            return Err(ForumError::Forbidden(
                "only the author or an admin may modify this post".into(),
            ));
        }
        Ok(post)
    }

    pub async fn update_post(
        &self,
        principal: &Principal,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Post, ForumError> {
        let title = required("title", title)?;
        let content = required("content", content)?;
        self.owned_post(principal, id).await?;

        let post = self
            .posts
            .update_post(id, &title, &content)
            .await?
            .ok_or_else(|| ForumError::NotFound(format!("post {id}")))?;
        info!(post_id = id, user_id = principal.user_id, "post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, principal: &Principal, id: i64) -> Result<(), ForumError> {
        self.owned_post(principal, id).await?;
        if !self.posts.delete_post(id).await? {
            return Err(ForumError::NotFound(format!("post {id}")));
        }
        info!(post_id = id, user_id = principal.user_id, "post deleted");
        Ok(())
    }

    pub async fn create_comment(
        &self,
        principal: &Principal,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, ForumError> {
        let content = required("content", content)?;
        self.get_post(post_id).await?;
        let author_name = self.author_name(principal.user_id).await;

        let comment = self
            .comments
            .create_comment(NewComment {
                post_id,
                content,
                author_id: principal.user_id,
                author_name,
            })
            .await?;
        info!(comment_id = comment.id, post_id, "comment created");
        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ForumError> {
        self.get_post(post_id).await?;
        Ok(self.comments.list_comments(post_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::auth::{NewUser, ROLE_ADMIN, ROLE_USER};

    struct Fixture {
        forum: ForumService,
        alice: Principal,
        bob: Principal,
        admin: Principal,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let mut ids = Vec::new();
        for (name, role) in [("alice", ROLE_USER), ("bob", ROLE_USER), ("root", ROLE_ADMIN)] {
            let id = store
                .create_user(NewUser {
                    username: name.into(),
                    password_hash: "x".into(),
                    role: role.into(),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
            ids.push(Principal {
                user_id: id,
                role: role.into(),
            });
        }
        let admin = ids.pop().unwrap();
        let bob = ids.pop().unwrap();
        let alice = ids.pop().unwrap();
        Fixture {
            forum: ForumService::new(store.clone(), store.clone(), store),
            alice,
            bob,
            admin,
        }
    }

    #[tokio::test]
    async fn create_post_records_author_name() {
        let f = fixture().await;
        let post = f
            .forum
            .create_post(&f.alice, " Hello ", "First post")
            .await
            .unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.author_name, "alice");
        assert_eq!(f.forum.get_post(post.id).await.unwrap(), post);
    }

    #[tokio::test]
    async fn unknown_author_falls_back() {
        let f = fixture().await;
        let ghost = Principal {
            user_id: 99,
            role: ROLE_USER.into(),
        };
        let post = f.forum.create_post(&ghost, "t", "c").await.unwrap();
        assert_eq!(post.author_name, UNKNOWN_AUTHOR);
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let f = fixture().await;
        let err = f.forum.create_post(&f.alice, "   ", "c").await.unwrap_err();
        assert!(matches!(err, ForumError::Validation(_)));
    }

    #[tokio::test]
    async fn only_author_or_admin_may_modify() {
        let f = fixture().await;
        let post = f.forum.create_post(&f.alice, "t", "c").await.unwrap();

        let err = f
            .forum
            .update_post(&f.bob, post.id, "t2", "c2")
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::Forbidden(_)));

        let err = f.forum.delete_post(&f.bob, post.id).await.unwrap_err();
        assert!(matches!(err, ForumError::Forbidden(_)));

        let updated = f
            .forum
            .update_post(&f.alice, post.id, "t2", "c2")
            .await
            .unwrap();
        assert_eq!(updated.title, "t2");

        f.forum.delete_post(&f.admin, post.id).await.unwrap();
        assert!(matches!(
            f.forum.get_post(post.id).await,
            Err(ForumError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn posts_are_listed_newest_first() {
        let f = fixture().await;
        f.forum.create_post(&f.alice, "one", "c").await.unwrap();
        f.forum.create_post(&f.bob, "two", "c").await.unwrap();
        let titles: Vec<_> = f
            .forum
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["two", "one"]);
    }

    #[tokio::test]
    async fn comments_require_existing_post() {
        let f = fixture().await;
        let err = f
            .forum
            .create_comment(&f.alice, 404, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::NotFound(_)));
        assert!(matches!(
            f.forum.list_comments(404).await,
            Err(ForumError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn comments_are_listed_per_post() {
        let f = fixture().await;
        let a = f.forum.create_post(&f.alice, "a", "c").await.unwrap();
        let b = f.forum.create_post(&f.alice, "b", "c").await.unwrap();
        f.forum.create_comment(&f.bob, a.id, "first").await.unwrap();
        f.forum.create_comment(&f.bob, a.id, "second").await.unwrap();
        f.forum.create_comment(&f.bob, b.id, "elsewhere").await.unwrap();

        let on_a: Vec<_> = f
            .forum
            .list_comments(a.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.content, c.author_name))
            .collect();
        assert_eq!(
            on_a,
            [
                ("second".to_string(), "bob".to_string()),
                ("first".to_string(), "bob".to_string()),
            ]
        );
    }
}
