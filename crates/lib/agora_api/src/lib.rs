//! # agora_api
//!
//! HTTP API library for Agora.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

use std::sync::Arc;

use agora_core::Store;
use agora_core::auth::service::AuthService;
use agora_core::chat::service::ChatService;
use agora_core::forum::service::ForumService;
use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, chat, health, posts};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub forum: ForumService,
    pub chat: ChatService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire every service over one store.
    pub fn new<S: Store + 'static>(store: Arc<S>, config: ApiConfig) -> Self {
        Self {
            auth: AuthService::new(store.clone(), store.clone(), config.auth_config()),
            forum: ForumService::new(store.clone(), store.clone(), store.clone()),
            chat: ChatService::new(store.clone(), store),
            config,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `agora_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    agora_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_VALIDATE, post(auth::validate_token_handler))
        .route(routes::GET_AUTH_USER_ID, get(auth::get_user_handler))
        .route(routes::POSTS, get(posts::list_posts_handler))
        .route(routes::POSTS_ID, get(posts::get_post_handler))
        .route(routes::POSTS_ID_COMMENTS, get(posts::list_comments_handler))
        .route(routes::CHAT_MESSAGES, get(chat::list_messages_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::POSTS, post(posts::create_post_handler))
        .route(
            routes::POSTS_ID,
            axum::routing::put(posts::update_post_handler).delete(posts::delete_post_handler),
        )
        .route(
            routes::POSTS_ID_COMMENTS,
            post(posts::create_comment_handler),
        )
        .route(routes::CHAT_MESSAGES, post(chat::post_message_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
