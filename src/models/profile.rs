// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Professional profile model with embedded experience and education.
//!
//! Profiles are one-to-one with users and stored keyed by the user id, so
//! writing profile data twice for the same user updates in place rather
//! than duplicating.

use crate::subdoc;
use serde::{Deserialize, Serialize};

/// A work-experience entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    /// Generated entry id (UUID v4), distinct from the profile's key
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An education entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    #[serde(rename = "fieldofstudy")]
    pub field_of_study: String,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Social media links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Profile stored in Firestore, keyed by the owning user's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user reference (also the document ID)
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "githubusername", skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    #[serde(default)]
    pub social: Social,
    /// Newest first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Newest first
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: String,
}

impl Profile {
    /// Prepend a work-experience entry.
    pub fn add_experience(&mut self, entry: Experience) {
        subdoc::prepend(&mut self.experience, entry);
    }

    /// Remove the experience entry with the given id, if present.
    /// Removal of an unknown id leaves the collection unchanged.
    pub fn remove_experience(&mut self, entry_id: &str) -> usize {
        subdoc::remove_where(&mut self.experience, |entry| entry.id == entry_id)
    }

    /// Prepend an education entry.
    pub fn add_education(&mut self, entry: Education) {
        subdoc::prepend(&mut self.education, entry);
    }

    /// Remove the education entry with the given id, if present.
    pub fn remove_education(&mut self, entry_id: &str) -> usize {
        subdoc::remove_where(&mut self.education, |entry| entry.id == entry_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> Profile {
        Profile {
            user: "u1".to_string(),
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

    fn experience(id: &str, title: &str) -> Experience {
        Experience {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: None,
            from: "2020-01-01".to_string(),
            to: None,
            description: None,
        }
    }

    #[test]
    fn test_experience_is_newest_first() {
        let mut profile = test_profile();
        profile.add_experience(experience("e1", "Junior"));
        profile.add_experience(experience("e2", "Senior"));

        assert_eq!(profile.experience[0].id, "e2");
        assert_eq!(profile.experience[1].id, "e1");
    }

    #[test]
    fn test_remove_experience_by_id() {
        let mut profile = test_profile();
        profile.add_experience(experience("e1", "Junior"));
        profile.add_experience(experience("e2", "Senior"));

        assert_eq!(profile.remove_experience("e1"), 1);
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].id, "e2");

        // Unknown ids are silently ignored.
        assert_eq!(profile.remove_experience("e9"), 0);
        assert_eq!(profile.experience.len(), 1);
    }

    #[test]
    fn test_education_prepend_and_remove() {
        let mut profile = test_profile();
        profile.add_education(Education {
            id: "ed1".to_string(),
            school: "MIT".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "CS".to_string(),
            from: "2015-09-01".to_string(),
            to: Some("2019-06-01".to_string()),
        });

        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.remove_education("ed1"), 1);
        assert!(profile.education.is_empty());
    }
}
