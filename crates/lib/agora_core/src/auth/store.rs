//! Credential and session store traits.
//!
//! Implemented by [`crate::db::PgStore`] and [`crate::memory::MemoryStore`].
//! A missing row is `Ok(None)`, never an error.

use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::auth::{NewUser, Session, User, UserWithPassword};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, returning the assigned id. A taken username is
    /// [`StoreError::Conflict`].
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError>;

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, session: &Session) -> Result<(), StoreError>;

    async fn get_session_by_token(&self, token: &str) -> Result<Option<Session>, StoreError>;
}
