// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login, and current-user lookup.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::password;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Public routes: registration and login (no token required).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
}

/// Authenticated routes (auth middleware applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(get_me))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Please choose a password with at least 6 characters"
    ))]
    pub password: String,
}

/// Session token response.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new account and return a session token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate().map_err(AppError::from_validation)?;

    if state.db.get_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::Validation(vec!["User already exists".to_string()]));
    }

    let password_hash = password::hash_password(&req.password)?;
    let user = User::new(&req.name, &req.email, &password_hash);
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "New account registered");

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Please choose a password with at least 6 characters"
    ))]
    pub password: String,
}

/// Verify credentials and return a session token.
///
/// Bad email and bad password are reported separately, matching the
/// existing API contract.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate().map_err(AppError::from_validation)?;

    let user = state
        .db
        .get_user_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::Validation(vec!["invalid Email".to_string()]))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Validation(vec!["invalid password".to_string()]));
    }

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

/// Current user response (password hash omitted).
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date: String,
}

/// Get the current account, minus the password hash.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .get_user(&actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        date: user.date,
    }))
}
