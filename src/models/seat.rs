//! Seat model.

use serde::{Deserialize, Serialize};

use super::{bool_from_param, Entity, EntityRef, Screen, SortDirection, Theatre};
use crate::validation::{
    at_least, optional_max_chars, positive_number, required_text, Validate, ValidationErrors,
};

/// Seat category, which drives the price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatType {
    Regular,
    Premium,
    Vip,
    Accessible,
    Couple,
}

/// A physical seat on a screen's layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    #[serde(rename = "_id")]
    pub id: String,
    pub row: String,
    pub seat_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_label: Option<String>,
    pub seat_type: SeatType,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub price_multiplier: f64,
    /// Layout column
    pub x: u32,
    /// Layout row
    pub y: u32,
    pub screen: EntityRef<Screen>,
    pub theatre: EntityRef<Theatre>,
}

fn default_available() -> bool {
    true
}

impl Seat {
    /// Label shown on tickets: the explicit label, or row + number ("F12").
    pub fn display_label(&self) -> String {
        match &self.seat_label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => format!("{}{}", self.row, self.seat_number),
        }
    }
}

impl Entity for Seat {
    const NAME: &'static str = "Seat";
    const BASE_PATH: &'static str = "/api/seats";

    type Filters = SeatFilters;
    type Submit = SeatSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Seat {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_position(
            &mut errors,
            &self.row,
            self.seat_number,
            self.seat_label.as_deref(),
            self.price_multiplier,
        );
        self.screen.validate_at(&mut errors, "screen");
        self.theatre.validate_at(&mut errors, "theatre");
        errors.into_result()
    }
}

/// Form payload for creating or updating a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSubmit {
    pub row: String,
    pub seat_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_label: Option<String>,
    pub seat_type: SeatType,
    pub is_available: bool,
    pub price_multiplier: f64,
    pub x: u32,
    pub y: u32,
    /// Screen ID
    pub screen: String,
    /// Theatre ID
    pub theatre: String,
}

impl Validate for SeatSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_position(
            &mut errors,
            &self.row,
            self.seat_number,
            self.seat_label.as_deref(),
            self.price_multiplier,
        );
        required_text(&mut errors, "screen", &self.screen);
        required_text(&mut errors, "theatre", &self.theatre);
        errors.into_result()
    }
}

fn check_position(
    errors: &mut ValidationErrors,
    row: &str,
    seat_number: u32,
    seat_label: Option<&str>,
    price_multiplier: f64,
) {
    required_text(errors, "row", row);
    optional_max_chars(errors, "row", Some(row), 10);
    at_least(errors, "seatNumber", seat_number, 1);
    optional_max_chars(errors, "seatLabel", seat_label, 20);
    positive_number(errors, "priceMultiplier", price_multiplier);
}

/// List filters for seats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeatFilters {
    /// Screen ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    /// Theatre ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theatre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_type: Option<SeatType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "bool_from_param"
    )]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_row: Option<SortDirection>,
}

impl Validate for SeatFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seat(label: Option<&str>) -> Seat {
        serde_json::from_value(json!({
            "_id": "s1",
            "row": "F",
            "seatNumber": 12,
            "seatLabel": label,
            "seatType": "VIP",
            "priceMultiplier": 1.5,
            "x": 12,
            "y": 6,
            "screen": "sc1",
            "theatre": "t1"
        }))
        .unwrap()
    }

    #[test]
    fn test_display_label() {
        assert_eq!(seat(None).display_label(), "F12");
        assert_eq!(seat(Some("Love seat 1")).display_label(), "Love seat 1");
    }

    #[test]
    fn test_availability_defaults_to_true() {
        let seat = seat(None);
        assert!(seat.is_available);
        assert!(seat.validate().is_ok());
    }

    #[test]
    fn test_price_multiplier_must_be_positive() {
        let mut seat = seat(None);
        seat.price_multiplier = 0.0;
        assert!(seat.validate().unwrap_err().has_path("priceMultiplier"));
    }
}
