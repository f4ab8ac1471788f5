//! Auth-related database queries.

use async_trait::async_trait;

use super::store::{SessionStore, UserStore};
use crate::db::{PgStore, StoreError};
use crate::models::auth::{NewUser, Session, User, UserWithPassword};

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.created_at)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, role, created_at, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO sessions (user_id, token, expires_at) VALUES ($1, $2, $3)")
            .bind(session.user_id)
            .bind(&session.token)
            .bind(session.expires_at)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn get_session_by_token(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query_as::<_, Session>(
            "SELECT user_id, token, expires_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
