//! Genre model.

use serde::{Deserialize, Serialize};

use super::{Entity, SortDirection};
use crate::validation::{optional_max_chars, text_length, Validate, ValidationErrors};

/// A film genre such as "Drama" or "Science Fiction".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Virtual: number of movies tagged with this genre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_count: Option<u32>,
}

impl Entity for Genre {
    const NAME: &'static str = "Genre";
    const BASE_PATH: &'static str = "/api/genres";

    type Filters = GenreFilters;
    type Submit = GenreSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Genre {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_genre(&mut errors, &self.name, self.description.as_deref());
        errors.into_result()
    }
}

/// Form payload for creating or updating a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSubmit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for GenreSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_genre(&mut errors, &self.name, self.description.as_deref());
        errors.into_result()
    }
}

fn check_genre(errors: &mut ValidationErrors, name: &str, description: Option<&str>) {
    text_length(errors, "name", name, 1, 75);
    optional_max_chars(errors, "description", description, 1000);
}

/// List filters for genres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenreFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_name: Option<SortDirection>,
}

impl Validate for GenreFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        optional_max_chars(&mut errors, "name", self.name.as_deref(), 75);
        errors.into_result()
    }
}
