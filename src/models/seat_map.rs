//! Seat map model: a seat's price and booking state for one showing.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityRef, Seat, Showing, SortDirection};
use crate::validation::{non_negative_number, required_text, Validate, ValidationErrors};

/// Booking state of a seat for a showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatMapStatus {
    Available,
    Reserved,
    Sold,
    Unavailable,
}

impl SeatMapStatus {
    pub fn is_bookable(&self) -> bool {
        matches!(self, SeatMapStatus::Available)
    }
}

/// One seat of one showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    #[serde(rename = "_id")]
    pub id: String,
    pub showing: EntityRef<Showing>,
    pub seat: EntityRef<Seat>,
    pub price: f64,
    pub status: SeatMapStatus,
}

impl Entity for SeatMap {
    const NAME: &'static str = "SeatMap";
    const BASE_PATH: &'static str = "/api/seatmaps";

    type Filters = SeatMapFilters;
    type Submit = SeatMapSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for SeatMap {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.showing.validate_at(&mut errors, "showing");
        self.seat.validate_at(&mut errors, "seat");
        non_negative_number(&mut errors, "price", self.price);
        errors.into_result()
    }
}

/// Form payload for creating or updating a seat map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapSubmit {
    /// Showing ID
    pub showing: String,
    /// Seat ID
    pub seat: String,
    pub price: f64,
    pub status: SeatMapStatus,
}

impl Validate for SeatMapSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "showing", &self.showing);
        required_text(&mut errors, "seat", &self.seat);
        non_negative_number(&mut errors, "price", self.price);
        errors.into_result()
    }
}

/// List filters for seat maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeatMapFilters {
    /// Showing ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing: Option<String>,
    /// Seat ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SeatMapStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_price: Option<SortDirection>,
}

impl Validate for SeatMapFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
