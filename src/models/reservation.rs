//! Reservation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityRef, SeatMap, Showing, SortDirection, User};
use crate::validation::{
    at_least, currency_code, non_negative_number, optional_max_chars, required_text, Validate,
    ValidationErrors, REQUIRED,
};

/// Where a reservation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Reserved,
    Paid,
    Cancelled,
    Refunded,
    Expired,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Reserved => "RESERVED",
            ReservationStatus::Paid => "PAID",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Refunded => "REFUNDED",
            ReservationStatus::Expired => "EXPIRED",
        }
    }

    /// The date field that must be set once a reservation reaches this status.
    pub fn lifecycle_field(&self) -> Option<&'static str> {
        match self {
            ReservationStatus::Reserved => None,
            ReservationStatus::Paid => Some("datePaid"),
            ReservationStatus::Cancelled => Some("dateCancelled"),
            ReservationStatus::Refunded => Some("dateRefunded"),
            ReservationStatus::Expired => Some("dateExpired"),
        }
    }
}

/// Timestamps recorded as a reservation moves through its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleDates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_cancelled: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_refunded: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_expired: Option<DateTime<Utc>>,
}

impl LifecycleDates {
    fn for_status(&self, status: ReservationStatus) -> Option<DateTime<Utc>> {
        match status {
            ReservationStatus::Reserved => None,
            ReservationStatus::Paid => self.date_paid,
            ReservationStatus::Cancelled => self.date_cancelled,
            ReservationStatus::Refunded => self.date_refunded,
            ReservationStatus::Expired => self.date_expired,
        }
    }
}

/// A customer's booking of seats for a showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: EntityRef<User>,
    pub showing: EntityRef<Showing>,
    pub ticket_count: u32,
    #[serde(default)]
    pub seating: Vec<EntityRef<SeatMap>>,
    pub price_paid: f64,
    pub currency: String,
    pub status: ReservationStatus,
    pub date_reserved: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: LifecycleDates,
    pub unique_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Reservation {
    const NAME: &'static str = "Reservation";
    const BASE_PATH: &'static str = "/api/reservations";

    type Filters = ReservationFilters;
    type Submit = ReservationSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Reservation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.user.validate_at(&mut errors, "user");
        self.showing.validate_at(&mut errors, "showing");
        for (index, seat) in self.seating.iter().enumerate() {
            seat.validate_at(&mut errors, &format!("seating[{index}]"));
        }
        required_text(&mut errors, "uniqueCode", &self.unique_code);
        check_booking(
            &mut errors,
            Booking {
                ticket_count: self.ticket_count,
                seat_count: self.seating.len(),
                price_paid: self.price_paid,
                currency: &self.currency,
                status: self.status,
                lifecycle: &self.lifecycle,
                notes: self.notes.as_deref(),
            },
        );
        errors.into_result()
    }
}

/// Form payload for creating or updating a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSubmit {
    /// User ID
    pub user: String,
    /// Showing ID
    pub showing: String,
    pub ticket_count: u32,
    /// Seat map IDs
    pub seating: Vec<String>,
    pub price_paid: f64,
    pub currency: String,
    pub status: ReservationStatus,
    #[serde(flatten)]
    pub lifecycle: LifecycleDates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ReservationSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "user", &self.user);
        required_text(&mut errors, "showing", &self.showing);
        for (index, seat) in self.seating.iter().enumerate() {
            required_text(&mut errors, &format!("seating[{index}]"), seat);
        }
        check_booking(
            &mut errors,
            Booking {
                ticket_count: self.ticket_count,
                seat_count: self.seating.len(),
                price_paid: self.price_paid,
                currency: &self.currency,
                status: self.status,
                lifecycle: &self.lifecycle,
                notes: self.notes.as_deref(),
            },
        );
        errors.into_result()
    }
}

struct Booking<'a> {
    ticket_count: u32,
    seat_count: usize,
    price_paid: f64,
    currency: &'a str,
    status: ReservationStatus,
    lifecycle: &'a LifecycleDates,
    notes: Option<&'a str>,
}

fn check_booking(errors: &mut ValidationErrors, booking: Booking<'_>) {
    at_least(errors, "ticketCount", booking.ticket_count, 1);
    if booking.seat_count > 0 && booking.seat_count != booking.ticket_count as usize {
        errors.push("seating", "Select one seat per ticket");
    }
    non_negative_number(errors, "pricePaid", booking.price_paid);
    currency_code(errors, "currency", booking.currency);
    optional_max_chars(errors, "notes", booking.notes, 3000);

    // Each terminal status must carry the date it was reached
    if let Some(field) = booking.status.lifecycle_field() {
        if booking.lifecycle.for_status(booking.status).is_none() {
            errors.push(field, REQUIRED);
        }
    }
}

/// List filters for reservations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReservationFilters {
    /// User ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Showing ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_date_reserved: Option<SortDirection>,
}

impl Validate for ReservationFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
