// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post routes: CRUD plus like/unlike and comment add/delete.
//!
//! Like and comment mutations return the mutated collection rather than the
//! whole post; this asymmetry with the profile routes is part of the
//! existing API contract.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Comment, Like, Post};
use crate::policy;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Post routes (require authentication via the auth gate).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", post(create_post).get(list_posts))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/like/{id}", put(like_post))
        .route("/api/posts/unlike/{id}", put(unlike_post))
        .route("/api/posts/comment/{id}", post(add_comment))
        .route(
            "/api/posts/comment/{id}/{comment_id}",
            delete(delete_comment),
        )
}

#[derive(Deserialize, Validate)]
pub struct PostBody {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Create a post, freezing the author's display name into it.
async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<PostBody>,
) -> Result<Json<Post>> {
    req.validate().map_err(AppError::from_validation)?;

    let user = state
        .db
        .get_user(&actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let new_post = Post::new(&actor.id, &user.name, &req.text);
    state.db.upsert_post(&new_post).await?;

    Ok(Json(new_post))
}

/// List all posts, newest first.
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.db.list_posts().await?))
}

/// Get one post.
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>> {
    let post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(post))
}

/// Delete a post. Not-found is checked before ownership; only the post
/// owner may delete.
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post does not exist".to_string()))?;

    policy::require_owner(
        &actor.id,
        &post.user,
        "User is not authorized to remove this post",
    )?;

    state.db.delete_post(&id).await?;

    Ok(Json(json!({ "msg": "Post Deleted Successfully" })))
}

/// Like a post. Returns the updated likes collection.
async fn like_post(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>> {
    let mut post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.add_like(&actor.id)?;
    state.db.upsert_post(&post).await?;

    Ok(Json(post.likes))
}

/// Remove the actor's like. Returns the updated likes collection.
async fn unlike_post(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>> {
    let mut post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.remove_like(&actor.id)?;
    state.db.upsert_post(&post).await?;

    Ok(Json(post.likes))
}

/// Comment on a post. Returns the updated comments collection.
async fn add_comment(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<PostBody>,
) -> Result<Json<Vec<Comment>>> {
    req.validate().map_err(AppError::from_validation)?;

    let user = state
        .db
        .get_user(&actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.add_comment(&actor.id, &user.name, &req.text);
    state.db.upsert_post(&post).await?;

    Ok(Json(post.comments))
}

/// Delete a comment, author-only (the post owner has no override).
/// Returns the updated comments collection.
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>> {
    let mut post = state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.remove_comment(&comment_id, &actor.id)?;
    state.db.upsert_post(&post).await?;

    Ok(Json(post.comments))
}
