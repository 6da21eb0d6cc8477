//! Theatre model.

use serde::{Deserialize, Serialize};

use super::{Entity, SortDirection};
use crate::validation::{at_least, required_text, text_length, Validate, ValidationErrors};

/// Geographic position of a theatre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Postal address of a theatre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub street: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "street", &self.street);
        required_text(&mut errors, "city", &self.city);
        required_text(&mut errors, "country", &self.country);

        if let Some(coordinates) = self.coordinates {
            if !(-90.0..=90.0).contains(&coordinates.latitude) {
                errors.push("coordinates.latitude", "Must be between -90 and 90");
            }
            if !(-180.0..=180.0).contains(&coordinates.longitude) {
                errors.push("coordinates.longitude", "Must be between -180 and 180");
            }
        }

        errors.into_result()
    }
}

/// A cinema venue with one or more screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theatre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub location: Location,
    pub seat_capacity: u32,
    /// Virtual: number of screens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_count: Option<u32>,
    /// Virtual: number of seats across all screens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_count: Option<u32>,
}

impl Entity for Theatre {
    const NAME: &'static str = "Theatre";
    const BASE_PATH: &'static str = "/api/theatres";

    type Filters = TheatreFilters;
    type Submit = TheatreSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Theatre {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "name", &self.name, 1, 255);
        at_least(&mut errors, "seatCapacity", self.seat_capacity, 1);
        errors.nest("location", self.location.validate());
        errors.into_result()
    }
}

/// Form payload for creating or updating a theatre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheatreSubmit {
    pub name: String,
    pub location: Location,
    pub seat_capacity: u32,
}

impl Validate for TheatreSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "name", &self.name, 1, 255);
        at_least(&mut errors, "seatCapacity", self.seat_capacity, 1);
        errors.nest("location", self.location.validate());
        errors.into_result()
    }
}

/// List filters for theatres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TheatreFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_name: Option<SortDirection>,
}

impl Validate for TheatreFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_issues_are_nested() {
        let theatre: Theatre = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Rex",
            "location": {
                "street": "1 Boulevard Poissonnière",
                "city": "",
                "country": "France",
                "coordinates": { "latitude": 48.87, "longitude": 200.0 }
            },
            "seatCapacity": 2700
        }))
        .unwrap();

        let errors = theatre.validate().unwrap_err();
        assert!(errors.has_path("location.city"));
        assert!(errors.has_path("location.coordinates.longitude"));
        assert_eq!(errors.len(), 2);
    }
}
