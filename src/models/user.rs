//! User account model for storage and API.

use serde::{Deserialize, Serialize};

/// User account stored in Firestore (keyed by `id`).
///
/// `password_hash` must never appear in an API response; handlers map to
/// response structs that omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user identifier (UUID v4, also the document ID)
    pub id: String,
    /// Display name, denormalized into posts and comments at creation time
    pub name: String,
    /// Email address (unique across users)
    pub email: String,
    /// Argon2 password hash (PHC string)
    pub password_hash: String,
    /// Registration timestamp (RFC 3339)
    pub date: String,
}

impl User {
    /// Create a new account with a fresh id and the current timestamp.
    pub fn new(name: &str, email: &str, password_hash: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            date: chrono::Utc::now().to_rfc3339(),
        }
    }
}
