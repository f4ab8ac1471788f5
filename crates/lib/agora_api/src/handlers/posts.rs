//! Post and comment request handlers.

use agora_core::models::forum::{Comment, Post};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CommentsResponse, ContentRequest, PostRequest, PostsResponse};

/// `GET /api/v1/posts`: all posts, newest first.
pub async fn list_posts_handler(State(state): State<AppState>) -> AppResult<Json<PostsResponse>> {
    let posts = state.forum.list_posts().await?;
    Ok(Json(PostsResponse { posts }))
}

/// `POST /api/v1/posts`: create a post as the caller.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Json(body): Json<PostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let post = state
        .forum
        .create_post(&principal, &body.title, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /api/v1/posts/{id}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.forum.get_post(id).await?))
}

/// `PUT /api/v1/posts/{id}`: author or admin only.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(body): Json<PostRequest>,
) -> AppResult<Json<Post>> {
    let post = state
        .forum
        .update_post(&principal, id, &body.title, &body.content)
        .await?;
    Ok(Json(post))
}

/// `DELETE /api/v1/posts/{id}`: author or admin only.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.forum.delete_post(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/posts/{id}/comments`
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CommentsResponse>> {
    let comments = state.forum.list_comments(id).await?;
    Ok(Json(CommentsResponse { comments }))
}

/// `POST /api/v1/posts/{id}/comments`
pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(body): Json<ContentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .forum
        .create_comment(&principal, id, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
