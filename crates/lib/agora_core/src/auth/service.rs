//! Authentication service: register, login and token validation over the
//! user and session stores.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};

use super::AuthError;
use super::jwt::{issue_token, parse_token};
use super::password::{hash_password, verify_password};
use super::store::{SessionStore, UserStore};
use crate::models::auth::{
    LoginOutcome, NewUser, ROLE_ADMIN, ROLE_USER, Session, TokenVerdict, User,
};

/// Token signing configuration.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub token_secret: String,
    /// Lifetime of issued tokens and their sessions.
    pub token_ttl: Duration,
}

/// Register / login / validate, composed from the stores and [`AuthConfig`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create a user with the default role, returning its id.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64, AuthError> {
        self.register_with_role(username, password, ROLE_USER).await
    }

    /// Create a user with an explicit role tag.
    pub async fn register_with_role(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("username is required".into()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password is required".into()));
        }

        let password_hash = hash_password(password).map_err(|e| {
            error!(error = %e, "failed to hash password");
            AuthError::Hashing(e.to_string())
        })?;

        let user = NewUser {
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
            created_at: Utc::now(),
        };

        let user_id = self.users.create_user(user).await.map_err(|e| {
            error!(username, error = %e, "failed to create user");
            AuthError::Persistence(e)
        })?;

        info!(user_id, username, role, "user registered");
        Ok(user_id)
    }

    /// Create the named admin account unless a user with that name exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<i64, AuthError> {
        if let Some(existing) = self.users.get_user_by_username(username.trim()).await? {
            info!(user_id = existing.user.id, "admin account already present");
            return Ok(existing.user.id);
        }
        self.register_with_role(username, password, ROLE_ADMIN).await
    }

    /// Authenticate and open a session, returning the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self
            .authenticate(username.trim(), password)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        let token = issue_token(
            user.id,
            &user.role,
            &user.username,
            self.config.token_secret.as_bytes(),
            self.config.token_ttl,
        )
        .map_err(|e| {
            error!(user_id = user.id, error = %e, "failed to issue token");
            AuthError::Internal("internal server error".into())
        })?;

        let expires_at = Utc::now()
            .checked_add_signed(self.config.token_ttl)
            .ok_or_else(|| AuthError::Internal("internal server error".into()))?;
        let session = Session {
            user_id: user.id,
            token,
            expires_at,
        };

        // The token is dropped with `session` if this fails.
        if let Err(e) = self.sessions.create_session(&session).await {
            error!(user_id = user.id, error = %e, "failed to create session");
            return Err(AuthError::Internal("internal server error".into()));
        }

        debug!(user_id = user.id, "login succeeded");
        Ok(LoginOutcome {
            token: session.token,
            username: user.username,
        })
    }

    /// Every rejection reason ends in `None` so callers cannot tell them apart.
    async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let found = match self.users.get_user_by_username(username).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "user lookup failed during login");
                None
            }
        };
        let Some(candidate) = found else {
            debug!("login rejected: unknown username");
            return None;
        };
        match verify_password(password, &candidate.password_hash) {
            Ok(true) => Some(candidate.user),
            Ok(false) => {
                debug!(user_id = candidate.user.id, "login rejected: password mismatch");
                None
            }
            Err(e) => {
                warn!(user_id = candidate.user.id, error = %e, "stored digest unusable");
                None
            }
        }
    }

    /// Check a bearer token. Never fails: any fault is `valid == false`.
    ///
    /// The session store is not consulted, so a token stays valid until its
    /// own `exp`.
    pub fn validate_token(&self, token: &str) -> TokenVerdict {
        match parse_token(token, self.config.token_secret.as_bytes()) {
            Ok(claims) => TokenVerdict {
                valid: true,
                user_id: claims.user_id,
                role: claims.role,
            },
            Err(e) => {
                debug!(error = %e, "invalid token");
                TokenVerdict::invalid()
            }
        }
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AuthError> {
        self.users
            .get_user_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
