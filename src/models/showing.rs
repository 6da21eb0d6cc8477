//! Showing model: one scheduled screening of a movie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{bool_from_param, Entity, EntityRef, Movie, Screen, SortDirection, Theatre};
use crate::validation::{
    non_negative_number, ordered_range, required_text, Validate, ValidationErrors,
};

/// A screening of a movie on a screen at a given time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showing {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie: EntityRef<Movie>,
    pub theatre: EntityRef<Theatre>,
    pub screen: EntityRef<Screen>,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub ticket_price: f64,
    pub language: String,
    #[serde(default)]
    pub subtitle_languages: Vec<String>,
    #[serde(default)]
    pub is_special_event: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Virtual: seats still available for booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl Entity for Showing {
    const NAME: &'static str = "Showing";
    const BASE_PATH: &'static str = "/api/showings";

    type Filters = ShowingFilters;
    type Submit = ShowingSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Showing {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.movie.validate_at(&mut errors, "movie");
        self.theatre.validate_at(&mut errors, "theatre");
        self.screen.validate_at(&mut errors, "screen");
        check_schedule(
            &mut errors,
            self.start_time,
            self.end_time,
            self.ticket_price,
            &self.language,
        );
        errors.into_result()
    }
}

/// Form payload for creating or updating a showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowingSubmit {
    /// Movie ID
    pub movie: String,
    /// Theatre ID
    pub theatre: String,
    /// Screen ID
    pub screen: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub ticket_price: f64,
    pub language: String,
    pub subtitle_languages: Vec<String>,
    pub is_special_event: bool,
    pub is_active: bool,
}

impl Validate for ShowingSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "movie", &self.movie);
        required_text(&mut errors, "theatre", &self.theatre);
        required_text(&mut errors, "screen", &self.screen);
        check_schedule(
            &mut errors,
            self.start_time,
            self.end_time,
            self.ticket_price,
            &self.language,
        );
        errors.into_result()
    }
}

fn check_schedule(
    errors: &mut ValidationErrors,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    ticket_price: f64,
    language: &str,
) {
    if let Some(end_time) = end_time {
        if end_time <= start_time {
            errors.push("endTime", "Must be after the start time");
        }
    }
    non_negative_number(errors, "ticketPrice", ticket_price);
    required_text(errors, "language", language);
}

/// List filters for showings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowingFilters {
    /// Movie ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    /// Theatre ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theatre: Option<String>,
    /// Screen ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_to: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "bool_from_param"
    )]
    pub is_active: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "bool_from_param"
    )]
    pub is_special_event: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_start_time: Option<SortDirection>,
}

impl Validate for ShowingFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        ordered_range(
            &mut errors,
            "startTo",
            self.start_from.as_ref(),
            self.start_to.as_ref(),
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submit() -> ShowingSubmit {
        ShowingSubmit {
            movie: "m1".to_string(),
            theatre: "t1".to_string(),
            screen: "sc1".to_string(),
            start_time: Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2026, 3, 14, 22, 15, 0).unwrap()),
            ticket_price: 12.5,
            language: "en".to_string(),
            subtitle_languages: vec!["fr".to_string()],
            is_special_event: false,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_showing_submit() {
        assert!(submit().validate().is_ok());
    }

    #[test]
    fn test_end_time_must_follow_start_time() {
        let mut showing = submit();
        showing.end_time = Some(showing.start_time);
        assert_eq!(
            showing.validate().unwrap_err().messages_for("endTime"),
            vec!["Must be after the start time"]
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut showing = submit();
        showing.ticket_price = -1.0;
        assert!(showing.validate().unwrap_err().has_path("ticketPrice"));
    }
}
