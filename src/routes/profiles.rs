// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes: upsert, lookup, experience/education entries, and
//! account deletion.
//!
//! Profile mutations return the whole profile document (unlike the post
//! routes, which return only the mutated collection). Account deletion
//! cascades over posts, profile, and user record concurrently with no
//! rollback on partial failure.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::profile::Social;
use crate::models::{Education, Experience, Profile};
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

/// Profile routes (require authentication via the auth gate).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/profiles",
            post(upsert_profile).get(list_profiles).delete(delete_account),
        )
        .route("/api/profiles/me", get(get_my_profile))
        .route("/api/profiles/user/{user_id}", get(get_profile_by_user))
        .route("/api/profiles/experience", put(add_experience))
        .route(
            "/api/profiles/experience/{exp_id}",
            delete(delete_experience),
        )
        .route("/api/profiles/education", put(add_education))
        .route("/api/profiles/education/{edu_id}", delete(delete_education))
}

/// Skills arrive either as a JSON array or a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    List(Vec<String>),
    Csv(String),
}

impl SkillsField {
    fn into_vec(self) -> Vec<String> {
        match self {
            SkillsField::List(skills) => skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            SkillsField::Csv(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct ProfileBody {
    #[serde(default)]
    pub status: String,
    pub skills: Option<SkillsField>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub github: Option<String>,
}

/// Prefix bare host names with https. Values already carrying a scheme
/// pass through unchanged.
fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Normalize an optional URL field, mapping empty strings to None.
fn normalized(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| normalize_url(v.trim()))
}

/// Create or update the actor's profile.
///
/// Keyed by user id, so a second submission updates in place. Existing
/// experience and education entries survive an update untouched.
async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<ProfileBody>,
) -> Result<Json<Profile>> {
    let skills = req.skills.map(SkillsField::into_vec).unwrap_or_default();

    let mut errors = Vec::new();
    if req.status.trim().is_empty() {
        errors.push("status is required".to_string());
    }
    if skills.is_empty() {
        errors.push("skills is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let existing = state.db.get_profile(&actor.id).await?;

    let (experience, education, date) = match existing {
        Some(profile) => (profile.experience, profile.education, profile.date),
        None => (Vec::new(), Vec::new(), chrono::Utc::now().to_rfc3339()),
    };

    let profile = Profile {
        user: actor.id.clone(),
        company: req.company.filter(|v| !v.trim().is_empty()),
        website: normalized(req.website),
        location: req.location.filter(|v| !v.trim().is_empty()),
        status: req.status,
        skills,
        bio: req.bio.filter(|v| !v.trim().is_empty()),
        github_username: req.github_username.filter(|v| !v.trim().is_empty()),
        social: Social {
            youtube: normalized(req.youtube),
            twitter: normalized(req.twitter),
            instagram: normalized(req.instagram),
            linkedin: normalized(req.linkedin),
            facebook: normalized(req.facebook),
            github: normalized(req.github),
        },
        experience,
        education,
        date,
    };

    state.db.upsert_profile(&profile).await?;

    Ok(Json(profile))
}

/// Get the actor's own profile.
///
/// The original API reports an absent profile as a 400 with a message, not
/// a 404; preserved for compatibility.
async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    let profile = state
        .db
        .get_profile(&actor.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("There is no profile for this user".to_string()))?;
    Ok(Json(profile))
}

/// List all profiles.
async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Profile>>> {
    Ok(Json(state.db.list_profiles().await?))
}

/// Get a profile by user id.
async fn get_profile_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>> {
    let profile = state.db.get_profile(&user_id).await?.ok_or_else(|| {
        AppError::BadRequest("There is no profile for the given user".to_string())
    })?;
    Ok(Json(profile))
}

/// Delete the actor's account: posts, profile, and user record.
///
/// The three deletions run concurrently and are independent; the first
/// failure surfaces, and already-completed deletions are not rolled back.
/// Likes and comments the actor left on other users' posts are left in
/// place.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(user_id = %actor.id, "User-initiated account deletion");

    tokio::try_join!(
        state.db.delete_posts_for_user(&actor.id),
        state.db.delete_profile(&actor.id),
        state.db.delete_user(&actor.id),
    )?;

    Ok(Json(
        json!({ "msg": "user information is deleted successfully" }),
    ))
}

// ─── Experience ──────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ExperienceBody {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub location: Option<String>,
    #[validate(length(
        min = 1,
        message = "From Date is required and needs to be from the past"
    ))]
    pub from: String,
    pub to: Option<String>,
    pub description: Option<String>,
}

/// Enforce `from < to` for entries with a `to` date. Dates are ISO-8601
/// strings, so lexical comparison matches chronological order.
fn check_date_order(from: &str, to: Option<&str>) -> Result<()> {
    if let Some(to) = to {
        if from >= to {
            return Err(AppError::Validation(vec![
                "From Date is required and needs to be from the past".to_string(),
            ]));
        }
    }
    Ok(())
}

/// Add a work-experience entry. Returns the whole profile.
async fn add_experience(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<ExperienceBody>,
) -> Result<Json<Profile>> {
    req.validate().map_err(AppError::from_validation)?;
    check_date_order(&req.from, req.to.as_deref())?;

    let mut profile = state
        .db
        .get_profile(&actor.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("There is no profile for this user".to_string()))?;

    profile.add_experience(Experience {
        id: uuid::Uuid::new_v4().to_string(),
        title: req.title,
        company: req.company,
        location: req.location,
        from: req.from,
        to: req.to,
        description: req.description,
    });

    state.db.upsert_profile(&profile).await?;

    Ok(Json(profile))
}

/// Remove an experience entry by id. Unknown ids are a silent no-op, as in
/// the original API. Returns the whole profile.
async fn delete_experience(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>> {
    let mut profile = state
        .db
        .get_profile(&actor.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("There is no profile for this user".to_string()))?;

    profile.remove_experience(&exp_id);
    state.db.upsert_profile(&profile).await?;

    Ok(Json(profile))
}

// ─── Education ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct EducationBody {
    #[validate(length(min = 1, message = "school is required"))]
    pub school: String,
    #[validate(length(min = 1, message = "degree is required"))]
    pub degree: String,
    #[serde(rename = "fieldofstudy")]
    #[validate(length(min = 1, message = "fieldofstudy is required"))]
    pub field_of_study: String,
    #[validate(length(
        min = 1,
        message = "From Date is required and needs to be from the past"
    ))]
    pub from: String,
    pub to: Option<String>,
}

/// Add an education entry. Returns the whole profile.
async fn add_education(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<EducationBody>,
) -> Result<Json<Profile>> {
    req.validate().map_err(AppError::from_validation)?;
    check_date_order(&req.from, req.to.as_deref())?;

    let mut profile = state
        .db
        .get_profile(&actor.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("There is no profile for this user".to_string()))?;

    profile.add_education(Education {
        id: uuid::Uuid::new_v4().to_string(),
        school: req.school,
        degree: req.degree,
        field_of_study: req.field_of_study,
        from: req.from,
        to: req.to,
    });

    state.db.upsert_profile(&profile).await?;

    Ok(Json(profile))
}

/// Remove an education entry by id. Returns the whole profile.
async fn delete_education(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>> {
    let mut profile = state
        .db
        .get_profile(&actor.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("There is no profile for this user".to_string()))?;

    profile.remove_education(&edu_id);
    state.db.upsert_profile(&profile).await?;

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_from_csv() {
        let skills = SkillsField::Csv("Rust, Go,  SQL ,".to_string()).into_vec();
        assert_eq!(skills, vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn test_skills_from_list() {
        let skills =
            SkillsField::List(vec![" Rust ".to_string(), String::new(), "Go".to_string()])
                .into_vec();
        assert_eq!(skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_normalized_drops_empty_values() {
        assert_eq!(normalized(Some("  ".to_string())), None);
        assert_eq!(normalized(None), None);
        assert_eq!(
            normalized(Some("github.com/ada".to_string())),
            Some("https://github.com/ada".to_string())
        );
    }

    #[test]
    fn test_date_order_check() {
        assert!(check_date_order("2020-01-01", Some("2021-01-01")).is_ok());
        assert!(check_date_order("2020-01-01", None).is_ok());
        assert!(check_date_order("2021-01-01", Some("2020-01-01")).is_err());
        assert!(check_date_order("2020-01-01", Some("2020-01-01")).is_err());
    }
}
