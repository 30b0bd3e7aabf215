// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Integration tests for Firestore persistence and cascade deletion.
//!
//! These tests require the Firestore emulator to be running; they skip
//! themselves when FIRESTORE_EMULATOR_HOST is not set.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use devconnect::models::profile::Social;
use devconnect::models::{Post, Profile, User};
use tower::ServiceExt;

mod common;

const TOKEN_HEADER: &str = "x-auth-token";

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_user(name: &str) -> User {
    User::new(name, &format!("{}@example.com", uuid::Uuid::new_v4()), "hash")
}

fn test_profile(user_id: &str) -> Profile {
    Profile {
        user: user_id.to_string(),
        company: None,
        website: None,
        location: None,
        status: "Developer".to_string(),
        skills: vec!["Rust".to_string()],
        bio: None,
        github_username: None,
        social: Social::default(),
        experience: Vec::new(),
        education: Vec::new(),
        date: chrono::Utc::now().to_rfc3339(),
    }
}

#[tokio::test]
async fn test_post_round_trip_with_nested_collections() {
    require_emulator!();
    let db = common::test_db().await;

    let owner = test_user("Ada");
    let mut post = Post::new(&owner.id, &owner.name, "hello");
    post.add_like("liker-1").unwrap();
    post.add_comment("commenter-1", "Bob", "nice");

    db.upsert_post(&post).await.unwrap();

    let loaded = db.get_post(&post.id).await.unwrap().expect("post exists");
    assert_eq!(loaded.user, owner.id);
    assert_eq!(loaded.likes.len(), 1);
    assert_eq!(loaded.likes[0].user, "liker-1");
    assert_eq!(loaded.comments.len(), 1);
    assert_eq!(loaded.comments[0].text, "nice");

    db.delete_post(&post.id).await.unwrap();
    assert!(db.get_post(&post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_profile_upsert_is_idempotent_by_user() {
    require_emulator!();
    let db = common::test_db().await;

    let user = test_user("Ada");
    let mut profile = test_profile(&user.id);
    db.upsert_profile(&profile).await.unwrap();

    // Second write for the same user updates in place.
    profile.status = "Senior Developer".to_string();
    db.upsert_profile(&profile).await.unwrap();

    let profiles: Vec<_> = db
        .list_profiles()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.user == user.id)
        .collect();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].status, "Senior Developer");

    db.delete_profile(&user.id).await.unwrap();
}

#[tokio::test]
async fn test_user_lookup_by_email() {
    require_emulator!();
    let db = common::test_db().await;

    let user = test_user("Ada");
    db.upsert_user(&user).await.unwrap();

    let found = db
        .get_user_by_email(&user.email)
        .await
        .unwrap()
        .expect("user by email");
    assert_eq!(found.id, user.id);

    assert!(db
        .get_user_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());

    db.delete_user(&user.id).await.unwrap();
}

#[tokio::test]
async fn test_account_deletion_cascades_but_leaves_stale_entries() {
    require_emulator!();
    let db = common::test_db().await;

    // Account to be deleted, with a profile and two posts.
    let doomed = test_user("Doomed");
    db.upsert_user(&doomed).await.unwrap();
    db.upsert_profile(&test_profile(&doomed.id)).await.unwrap();

    let post_a = Post::new(&doomed.id, &doomed.name, "first");
    let post_b = Post::new(&doomed.id, &doomed.name, "second");
    db.upsert_post(&post_a).await.unwrap();
    db.upsert_post(&post_b).await.unwrap();

    // A bystander's post that the doomed account liked and commented on.
    let bystander = test_user("Bystander");
    db.upsert_user(&bystander).await.unwrap();
    let mut other_post = Post::new(&bystander.id, &bystander.name, "unrelated");
    other_post.add_like(&doomed.id).unwrap();
    other_post.add_comment(&doomed.id, &doomed.name, "bye");
    db.upsert_post(&other_post).await.unwrap();

    // The cascade: three independent deletions, as the handler issues them.
    let (deleted_posts, _, _) = tokio::try_join!(
        db.delete_posts_for_user(&doomed.id),
        db.delete_profile(&doomed.id),
        db.delete_user(&doomed.id),
    )
    .unwrap();
    assert_eq!(deleted_posts, 2);

    // Everything owned by the account is gone.
    assert!(db.get_user(&doomed.id).await.unwrap().is_none());
    assert!(db.get_profile(&doomed.id).await.unwrap().is_none());
    assert!(db.get_post(&post_a.id).await.unwrap().is_none());
    assert!(db.get_post(&post_b.id).await.unwrap().is_none());

    // Embedded entries in other users' posts go stale but stay put.
    let survivor = db
        .get_post(&other_post.id)
        .await
        .unwrap()
        .expect("bystander post survives");
    assert_eq!(survivor.likes.len(), 1);
    assert_eq!(survivor.likes[0].user, doomed.id);
    assert_eq!(survivor.comments.len(), 1);
    assert_eq!(survivor.comments[0].user, doomed.id);

    db.delete_post(&other_post.id).await.unwrap();
    db.delete_user(&bystander.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found_before_any_ownership_check() {
    require_emulator!();
    let (app, state) = common::create_emulator_app().await;

    // The actor owns nothing; an absent post id must still report
    // not-found, never an authorization denial.
    let token = state.tokens.issue("not-the-owner").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/posts/{}", uuid::Uuid::new_v4()))
                .header(TOKEN_HEADER, token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["msg"], "Post does not exist");
}

#[tokio::test]
async fn test_delete_post_is_owner_only() {
    require_emulator!();
    let (app, state) = common::create_emulator_app().await;

    let owner = test_user("Owner");
    state.db.upsert_user(&owner).await.unwrap();
    let post = Post::new(&owner.id, &owner.name, "mine");
    state.db.upsert_post(&post).await.unwrap();

    // A different authenticated actor is denied with the exact message
    // and the post survives.
    let intruder_token = state.tokens.issue("intruder").unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/posts/{}", post.id))
                .header(TOKEN_HEADER, intruder_token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["msg"], "User is not authorized to remove this post");
    assert!(state.db.get_post(&post.id).await.unwrap().is_some());

    // The owner succeeds and gets the fixed confirmation payload.
    let owner_token = state.tokens.issue(&owner.id).unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/posts/{}", post.id))
                .header(TOKEN_HEADER, owner_token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["msg"], "Post Deleted Successfully");
    assert!(state.db.get_post(&post.id).await.unwrap().is_none());

    state.db.delete_user(&owner.id).await.unwrap();
}

#[tokio::test]
async fn test_like_mutation_persists_through_reload() {
    require_emulator!();
    let db = common::test_db().await;

    let owner = test_user("Ada");
    let post = Post::new(&owner.id, &owner.name, "hello");
    db.upsert_post(&post).await.unwrap();

    // Load, mutate, write back: the read-modify-write cycle the handlers use.
    let mut loaded = db.get_post(&post.id).await.unwrap().unwrap();
    loaded.add_like("u2").unwrap();
    db.upsert_post(&loaded).await.unwrap();

    let mut reloaded = db.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(reloaded.likes.len(), 1);

    // Duplicate like fails against the stored state too.
    assert!(reloaded.add_like("u2").is_err());

    reloaded.remove_like("u2").unwrap();
    db.upsert_post(&reloaded).await.unwrap();

    let final_state = db.get_post(&post.id).await.unwrap().unwrap();
    assert!(final_state.likes.is_empty());

    db.delete_post(&post.id).await.unwrap();
}
