//! User model with its public profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, SortDirection};
use crate::validation::{
    email, not_in_future, optional_max_chars, optional_url, text_length, username, Validate,
    ValidationErrors,
};

/// Public profile attached to a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl Validate for UserProfile {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        username(&mut errors, "username", &self.username);
        optional_url(&mut errors, "avatar", self.avatar.as_deref());
        optional_max_chars(&mut errors, "bio", self.bio.as_deref(), 500);
        not_in_future(&mut errors, "dob", self.dob);
        errors.into_result()
    }
}

/// A customer or staff account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile: UserProfile,
    /// Virtual: number of reservations made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_count: Option<u32>,
}

impl Entity for User {
    const NAME: &'static str = "User";
    const BASE_PATH: &'static str = "/api/users";

    type Filters = UserFilters;
    type Submit = UserSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "name", &self.name, 1, 255);
        email(&mut errors, "email", &self.email);
        errors.nest("profile", self.profile.validate());
        errors.into_result()
    }
}

/// Form payload for creating or updating a user and their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubmit {
    pub name: String,
    pub email: String,
    pub profile: UserProfile,
}

impl Validate for UserSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "name", &self.name, 1, 255);
        email(&mut errors, "email", &self.email);
        errors.nest("profile", self.profile.validate());
        errors.into_result()
    }
}

/// List filters for users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_name: Option<SortDirection>,
}

impl Validate for UserFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_issues_nested_under_profile() {
        let submit = UserSubmit {
            name: "Ana".to_string(),
            email: "ana-at-example.com".to_string(),
            profile: UserProfile {
                username: "a!".to_string(),
                avatar: None,
                bio: None,
                dob: None,
                country: None,
                is_private: false,
            },
        };

        let errors = submit.validate().unwrap_err();
        assert!(errors.has_path("email"));
        assert!(errors.has_path("profile.username"));
        assert_eq!(errors.len(), 2);
    }
}
