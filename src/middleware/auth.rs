// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuance/verification and the auth gate middleware.
//!
//! Tokens are HS256 JWTs binding exactly one user id and nothing else, with
//! a fixed five-day validity. The signing key is process-wide configuration,
//! loaded once at startup; there is no rotation support.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Fixed token validity: 5 days.
const TOKEN_VALIDITY_SECS: usize = 5 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id). The only claim we trust.
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated actor extracted from a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

/// Token verification failures. Both kinds collapse to the same outward
/// 401 response; the distinction exists for logging and tests only.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("token is malformed or has a bad signature")]
    Invalid,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies session tokens against the process-wide signing key.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(signing_key),
            decoding: DecodingKey::from_secret(signing_key),
        }
    }

    /// Issue a token for `user_id`, valid for five days.
    pub fn issue(&self, user_id: &str) -> anyhow::Result<String> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_VALIDITY_SECS,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and resolve the actor it binds.
    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid,
            })?;

        Ok(AuthUser {
            id: token_data.claims.sub,
        })
    }
}

/// Middleware that requires a valid session token.
///
/// Absence of the header and an invalid/expired token produce distinct
/// response bodies, but both are 401 and neither reaches a handler.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A missing header and an unreadable one are distinct failures: only
    // absence gets the "not available" body.
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .ok_or(AppError::MissingToken)?;
    let token = header.to_str().map_err(|_| AppError::InvalidToken)?;

    // Expired and invalid collapse to the same outward response.
    let auth_user = state
        .tokens
        .verify(token)
        .map_err(|_| AppError::InvalidToken)?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
