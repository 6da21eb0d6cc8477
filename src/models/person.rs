//! Person model: anyone who can be credited on a movie.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, SortDirection};
use crate::validation::{
    not_in_future, optional_max_chars, optional_url, text_length, Validate, ValidationErrors,
};

/// An actor, director or other film professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Virtual: number of movie credits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_count: Option<u32>,
}

impl Entity for Person {
    const NAME: &'static str = "Person";
    const BASE_PATH: &'static str = "/api/persons";

    type Filters = PersonFilters;
    type Submit = PersonSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_person(
            &mut errors,
            &self.name,
            self.biography.as_deref(),
            self.dob,
            self.profile_image.as_deref(),
        );
        errors.into_result()
    }
}

/// Form payload for creating or updating a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSubmit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Validate for PersonSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_person(
            &mut errors,
            &self.name,
            self.biography.as_deref(),
            self.dob,
            self.profile_image.as_deref(),
        );
        errors.into_result()
    }
}

fn check_person(
    errors: &mut ValidationErrors,
    name: &str,
    biography: Option<&str>,
    dob: Option<NaiveDate>,
    profile_image: Option<&str>,
) {
    text_length(errors, "name", name, 1, 255);
    optional_max_chars(errors, "biography", biography, 5000);
    not_in_future(errors, "dob", dob);
    optional_url(errors, "profileImage", profile_image);
}

/// List filters for persons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_name: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_dob: Option<SortDirection>,
}

impl Validate for PersonFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
