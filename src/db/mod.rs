//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Profiles are keyed by the owning user's id (one profile per user).
    pub const PROFILES: &str = "profiles";
    pub const POSTS: &str = "posts";
}
