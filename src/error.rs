// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! The wire format is part of the public contract: authentication and
//! authorization failures carry a `{"msg": ...}` body, validation failures
//! carry an `{"errors": [{"msg": ...}]}` list, and unexpected failures are
//! collapsed to a generic 500 with details only in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No credential header was present on the request.
    #[error("token is not available, authorization denied")]
    MissingToken,

    /// The credential was present but malformed, forged, or expired.
    /// Expiry and invalidity are deliberately not distinguished outward.
    #[error("token is not valid, authorization denied")]
    InvalidToken,

    /// Authenticated actor lacks rights over an existing resource.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Field-level validation failures, surfaced as a message list.
    #[error("validation failed")]
    Validation(Vec<String>),

    /// Re-applying an operation that already took effect (e.g. liking a
    /// post twice). Distinct from [`AppError::Precondition`] by contract.
    #[error("{0}")]
    Duplicate(String),

    /// Undoing an operation that never took effect (e.g. unliking a post
    /// the actor never liked).
    #[error("{0}")]
    Precondition(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Flatten `validator` output into our message-list variant.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let msgs = errors
            .field_errors()
            .into_values()
            .flat_map(|field| field.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string())
            })
            .collect();
        AppError::Validation(msgs)
    }
}

/// Single-message error body: `{"msg": ...}`.
#[derive(Serialize)]
struct MsgResponse {
    msg: String,
}

/// Validation error body: `{"errors": [{"msg": ...}]}`.
#[derive(Serialize)]
struct ErrorsResponse {
    errors: Vec<MsgResponse>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            err @ (AppError::MissingToken | AppError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msgs) => {
                let body = ErrorsResponse {
                    errors: msgs.into_iter().map(|msg| MsgResponse { msg }).collect(),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AppError::Duplicate(msg)
            | AppError::Precondition(msg)
            | AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(MsgResponse { msg })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
