//! API server configuration.

use agora_core::auth::jwt::resolve_jwt_secret;
use agora_core::auth::service::AuthConfig;
use chrono::Duration;
use tracing::warn;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Longest accepted token lifetime: 10 years.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                                     |
    /// |--------------------|---------------------------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:8080`                            |
    /// | `DATABASE_URL`     | `postgres://localhost:5432/agora`           |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file     |
    /// | `TOKEN_TTL_SECS`   | `86400`                                     |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/agora".into()),
            jwt_secret: resolve_jwt_secret(),
            token_ttl_secs: parse_token_ttl(std::env::var("TOKEN_TTL_SECS").ok().as_deref()),
        }
    }

    /// Token settings for [`agora_core::auth::service::AuthService`].
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            token_secret: self.jwt_secret.clone(),
            token_ttl: Duration::seconds(self.token_ttl_secs.clamp(1, MAX_TOKEN_TTL_SECS)),
        }
    }
}

/// Parse a TTL in seconds; unparsable or out-of-range values fall back to the default.
fn parse_token_ttl(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_TOKEN_TTL_SECS;
    };
    match raw.trim().parse::<i64>() {
        Ok(secs) if (1..=MAX_TOKEN_TTL_SECS).contains(&secs) => secs,
        _ => {
            warn!(value = raw, "ignoring invalid TOKEN_TTL_SECS");
            DEFAULT_TOKEN_TTL_SECS
        }
    }
}
