//! Movie model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{bool_from_param, Entity, EntityRef, Genre, SortDirection};
use crate::validation::{
    at_least, optional_max_chars, optional_url, ordered_range, required_text, text_length,
    Validate, ValidationErrors, REQUIRED,
};

/// A film in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<EntityRef<Genre>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_released: bool,
    /// Running time in minutes
    pub runtime: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
    #[serde(rename = "trailerURL", skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    /// Virtual: mean review score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Virtual: number of scheduled showings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Movie {
    const NAME: &'static str = "Movie";
    const BASE_PATH: &'static str = "/api/movies";

    type Filters = MovieFilters;
    type Submit = MovieSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Movie {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_details(
            &mut errors,
            MovieDetails {
                title: &self.title,
                original_title: self.original_title.as_deref(),
                tagline: self.tagline.as_deref(),
                synopsis: self.synopsis.as_deref(),
                release_date: self.release_date,
                is_released: self.is_released,
                runtime: self.runtime,
                poster_image: self.poster_image.as_deref(),
                trailer_url: self.trailer_url.as_deref(),
            },
        );

        if self.genres.is_empty() {
            errors.push("genres", "Select at least one genre");
        }
        for (index, genre) in self.genres.iter().enumerate() {
            genre.validate_at(&mut errors, &format!("genres[{index}]"));
        }

        if let Some(rating) = self.average_rating {
            if !(0.0..=10.0).contains(&rating) {
                errors.push("averageRating", "Must be between 0 and 10");
            }
        }

        errors.into_result()
    }
}

/// Form payload for creating or updating a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSubmit {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Genre IDs
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub is_released: bool,
    pub runtime: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
    #[serde(rename = "trailerURL", skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

impl Validate for MovieSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_details(
            &mut errors,
            MovieDetails {
                title: &self.title,
                original_title: self.original_title.as_deref(),
                tagline: self.tagline.as_deref(),
                synopsis: self.synopsis.as_deref(),
                release_date: self.release_date,
                is_released: self.is_released,
                runtime: self.runtime,
                poster_image: self.poster_image.as_deref(),
                trailer_url: self.trailer_url.as_deref(),
            },
        );

        if self.genres.is_empty() {
            errors.push("genres", "Select at least one genre");
        }
        for (index, genre) in self.genres.iter().enumerate() {
            required_text(&mut errors, &format!("genres[{index}]"), genre);
        }

        errors.into_result()
    }
}

/// Fields shared between the record and its form.
struct MovieDetails<'a> {
    title: &'a str,
    original_title: Option<&'a str>,
    tagline: Option<&'a str>,
    synopsis: Option<&'a str>,
    release_date: Option<NaiveDate>,
    is_released: bool,
    runtime: u32,
    poster_image: Option<&'a str>,
    trailer_url: Option<&'a str>,
}

fn check_details(errors: &mut ValidationErrors, movie: MovieDetails<'_>) {
    text_length(errors, "title", movie.title, 1, 250);
    optional_max_chars(errors, "originalTitle", movie.original_title, 250);
    optional_max_chars(errors, "tagline", movie.tagline, 300);
    optional_max_chars(errors, "synopsis", movie.synopsis, 2000);
    at_least(errors, "runtime", movie.runtime, 1);
    optional_url(errors, "posterImage", movie.poster_image);
    optional_url(errors, "trailerURL", movie.trailer_url);

    // A released movie must say when it was released
    if movie.is_released && movie.release_date.is_none() {
        errors.push("releaseDate", REQUIRED);
    }
}

/// List filters for movies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Genre ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "bool_from_param"
    )]
    pub is_released: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_title: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_release_date: Option<SortDirection>,
}

impl Validate for MovieFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        optional_max_chars(&mut errors, "title", self.title.as_deref(), 250);
        ordered_range(
            &mut errors,
            "releaseTo",
            self.release_from.as_ref(),
            self.release_to.as_ref(),
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_entity;
    use serde_json::json;

    fn movie_json() -> serde_json::Value {
        json!({
            "_id": "m1",
            "title": "Parasite",
            "genres": ["g1", { "_id": "g2", "name": "Thriller" }],
            "releaseDate": "2019-05-30",
            "isReleased": true,
            "runtime": 132,
            "trailerURL": "https://video.example.com/parasite",
            "showingCount": 4
        })
    }

    #[test]
    fn test_movie_parses_with_mixed_genre_refs() {
        let movie: Movie = parse_entity("Movie", movie_json()).unwrap();
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[0].id(), "g1");
        assert_eq!(movie.genres[1].id(), "g2");
        assert_eq!(movie.showing_count, Some(4));
    }

    #[test]
    fn test_released_movie_requires_release_date() {
        let mut value = movie_json();
        value.as_object_mut().unwrap().remove("releaseDate");

        let movie: Movie = serde_json::from_value(value).unwrap();
        let errors = movie.validate().unwrap_err();
        assert_eq!(errors.messages_for("releaseDate"), vec![REQUIRED]);
    }

    #[test]
    fn test_unreleased_movie_without_date_is_valid() {
        let submit = MovieSubmit {
            title: "Untitled Project".to_string(),
            original_title: None,
            tagline: None,
            synopsis: None,
            genres: vec!["g1".to_string()],
            release_date: None,
            is_released: false,
            runtime: 95,
            original_language: None,
            country: None,
            poster_image: None,
            trailer_url: None,
        };
        assert!(submit.validate().is_ok());
    }

    #[test]
    fn test_submit_collects_every_issue() {
        let submit = MovieSubmit {
            title: String::new(),
            original_title: None,
            tagline: None,
            synopsis: None,
            genres: vec![],
            release_date: None,
            is_released: true,
            runtime: 0,
            original_language: None,
            country: None,
            poster_image: Some("poster".to_string()),
            trailer_url: None,
        };
        let errors = submit.validate().unwrap_err();
        for path in ["title", "genres", "runtime", "posterImage", "releaseDate"] {
            assert!(errors.has_path(path), "missing issue for {path}");
        }
    }

    #[test]
    fn test_submit_serializes_trailer_url_key() {
        let submit = MovieSubmit {
            title: "Alien".to_string(),
            original_title: None,
            tagline: None,
            synopsis: None,
            genres: vec!["g1".to_string()],
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25),
            is_released: true,
            runtime: 117,
            original_language: Some("en".to_string()),
            country: None,
            poster_image: None,
            trailer_url: Some("https://video.example.com/alien".to_string()),
        };
        let value = serde_json::to_value(&submit).unwrap();
        assert_eq!(value["trailerURL"], "https://video.example.com/alien");
        assert_eq!(value["releaseDate"], "1979-05-25");
        assert!(value.get("country").is_none());
    }

    #[test]
    fn test_filters_reject_inverted_release_window() {
        let filters = MovieFilters {
            release_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            release_to: NaiveDate::from_ymd_opt(2023, 1, 1),
            ..Default::default()
        };
        assert!(filters.validate().unwrap_err().has_path("releaseTo"));
    }
}
