// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ownership decisions for destructive operations.
//!
//! Deleting a post requires the post owner; deleting a comment requires the
//! comment author (not the post owner); deleting an account requires the
//! account holder. There is no admin override. Call sites check existence
//! first, so a not-found target never reaches these checks.

use crate::error::AppError;

/// May `actor_id` remove a resource owned by `owner_id`?
pub fn may_delete(actor_id: &str, owner_id: &str) -> bool {
    actor_id == owner_id
}

/// Enforce ownership, failing with the caller's denial message.
pub fn require_owner(actor_id: &str, owner_id: &str, denial: &str) -> Result<(), AppError> {
    if may_delete(actor_id, owner_id) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(denial.to_string()))
    }
}
