// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post model with embedded likes and comments.
//!
//! Likes and comments live inside the post document and are mutated through
//! the shared nested-collection protocol in [`crate::subdoc`]. A like is
//! keyed by the liking user's id (no separate entry id); comments carry
//! their own generated id.

use crate::error::AppError;
use crate::subdoc;
use serde::{Deserialize, Serialize};

/// A like entry. The user id doubles as the entry key, so a given user can
/// appear at most once per post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

/// A comment entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Generated entry id (UUID v4), distinct from the post id
    pub id: String,
    /// Comment author
    pub user: String,
    pub text: String,
    /// Author display name, frozen at comment time
    pub name: String,
    pub date: String,
}

/// Post stored in Firestore (keyed by `id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Owner reference, immutable after creation
    pub user: String,
    pub text: String,
    /// Owner display name, frozen at creation time
    pub name: String,
    /// Newest first
    pub likes: Vec<Like>,
    /// Newest first
    pub comments: Vec<Comment>,
    pub date: String,
}

impl Post {
    /// Create a new post with empty likes and comments.
    pub fn new(user_id: &str, name: &str, text: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: user_id.to_string(),
            text: text.to_string(),
            name: name.to_string(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Add a like from `actor_id`.
    ///
    /// Fails with a duplicate-operation error if the actor already likes
    /// this post; the collection is left unchanged in that case.
    pub fn add_like(&mut self, actor_id: &str) -> Result<(), AppError> {
        if self.likes.iter().any(|like| like.user == actor_id) {
            return Err(AppError::Duplicate("Post already liked".to_string()));
        }
        subdoc::prepend(
            &mut self.likes,
            Like {
                user: actor_id.to_string(),
            },
        );
        Ok(())
    }

    /// Remove `actor_id`'s like.
    ///
    /// Fails with a precondition error if the actor never liked this post.
    pub fn remove_like(&mut self, actor_id: &str) -> Result<(), AppError> {
        let removed = subdoc::remove_where(&mut self.likes, |like| like.user == actor_id);
        if removed == 0 {
            return Err(AppError::Precondition(
                "User has not liked the post previously!".to_string(),
            ));
        }
        Ok(())
    }

    /// Add a comment, returning the new entry.
    pub fn add_comment(&mut self, actor_id: &str, name: &str, text: &str) -> Comment {
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            user: actor_id.to_string(),
            text: text.to_string(),
            name: name.to_string(),
            date: chrono::Utc::now().to_rfc3339(),
        };
        subdoc::prepend(&mut self.comments, comment.clone());
        comment
    }

    /// Remove a comment by id, author-only.
    ///
    /// Not-found is checked before authorship, and the post owner gets no
    /// special privilege over other users' comments.
    pub fn remove_comment(&mut self, comment_id: &str, actor_id: &str) -> Result<(), AppError> {
        let comment = self
            .comments
            .iter()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| AppError::NotFound("Comment does not exist".to_string()))?;

        crate::policy::require_owner(actor_id, &comment.user, "User is not authorized")?;

        subdoc::remove_where(&mut self.comments, |comment| comment.id == comment_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_empty() {
        let post = Post::new("u1", "Ada", "hello");
        assert_eq!(post.user, "u1");
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_like_then_duplicate_like() {
        let mut post = Post::new("u1", "Ada", "hello");

        post.add_like("u2").unwrap();
        assert_eq!(post.likes.len(), 1);
        assert_eq!(post.likes[0].user, "u2");

        let err = post.add_like("u2").unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(post.likes.len(), 1);
    }

    #[test]
    fn test_likes_are_newest_first() {
        let mut post = Post::new("u1", "Ada", "hello");
        post.add_like("u2").unwrap();
        post.add_like("u3").unwrap();
        assert_eq!(post.likes[0].user, "u3");
        assert_eq!(post.likes[1].user, "u2");
    }

    #[test]
    fn test_unlike_without_like_is_a_precondition_failure() {
        let mut post = Post::new("u1", "Ada", "hello");
        post.add_like("u3").unwrap();

        let err = post.remove_like("u2").unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
        assert_eq!(post.likes.len(), 1);
    }

    #[test]
    fn test_like_unlike_round_trip() {
        let mut post = Post::new("u1", "Ada", "hello");
        post.add_like("u2").unwrap();
        post.remove_like("u2").unwrap();
        assert!(post.likes.is_empty());
    }

    #[test]
    fn test_comments_prepend_and_carry_fresh_ids() {
        let mut post = Post::new("u1", "Ada", "hello");
        let first = post.add_comment("u2", "Bob", "nice");
        let second = post.add_comment("u3", "Cyd", "agreed");

        assert_ne!(first.id, second.id);
        assert_eq!(post.comments[0].id, second.id);
        assert_eq!(post.comments[1].id, first.id);
    }

    #[test]
    fn test_comment_deletion_is_author_only() {
        let mut post = Post::new("u1", "Ada", "hello");
        let comment = post.add_comment("u2", "Bob", "nice");

        // The post owner is not the comment author and gets no override.
        let err = post.remove_comment(&comment.id, "u1").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(post.comments.len(), 1);

        post.remove_comment(&comment.id, "u2").unwrap();
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_missing_comment_is_not_found_before_ownership() {
        let mut post = Post::new("u1", "Ada", "hello");
        post.add_comment("u2", "Bob", "nice");

        // Even a non-author actor sees not-found for an absent comment id.
        let err = post.remove_comment("no-such-id", "u3").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_comment_removal_preserves_relative_order() {
        let mut post = Post::new("u1", "Ada", "hello");
        let a = post.add_comment("u2", "Bob", "one");
        let b = post.add_comment("u2", "Bob", "two");
        let c = post.add_comment("u2", "Bob", "three");

        post.remove_comment(&b.id, "u2").unwrap();

        let ids: Vec<&str> = post.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), a.id.as_str()]);
    }
}
