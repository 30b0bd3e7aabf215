// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared mutation protocol for nested document collections.
//!
//! Posts embed `likes` and `comments`; profiles embed `experience` and
//! `education`. All four follow the same two operations: new entries are
//! prepended (newest-first ordering) and removal filters by predicate,
//! preserving the relative order of the survivors. The owning document is
//! read, mutated in memory, and written back whole; there is no concurrency
//! token on the write, so concurrent mutations of the same collection can
//! lose one update (see DESIGN.md).

/// Prepend an entry (newest first).
pub fn prepend<T>(entries: &mut Vec<T>, entry: T) {
    entries.insert(0, entry);
}

/// Remove every entry matching the predicate, keeping survivor order.
/// Returns how many entries were removed.
pub fn remove_where<T, F>(entries: &mut Vec<T>, matches: F) -> usize
where
    F: Fn(&T) -> bool,
{
    let before = entries.len();
    entries.retain(|entry| !matches(entry));
    before - entries.len()
}
