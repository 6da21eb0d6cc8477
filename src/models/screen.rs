//! Screen model.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityRef, SortDirection, Theatre};
use crate::validation::{at_least, required_text, text_length, Validate, ValidationErrors};

/// Projection format of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenType {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "4DX")]
    FourDx,
    #[serde(rename = "IMAX")]
    Imax,
    #[serde(rename = "SCREEN_X")]
    ScreenX,
}

impl ScreenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenType::TwoD => "2D",
            ScreenType::ThreeD => "3D",
            ScreenType::FourDx => "4DX",
            ScreenType::Imax => "IMAX",
            ScreenType::ScreenX => "SCREEN_X",
        }
    }
}

/// An auditorium inside a theatre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(rename = "_id")]
    pub id: String,
    pub theatre: EntityRef<Theatre>,
    pub name: String,
    pub capacity: u32,
    pub screen_type: ScreenType,
    /// Virtual: number of seats laid out on this screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_count: Option<u32>,
}

impl Entity for Screen {
    const NAME: &'static str = "Screen";
    const BASE_PATH: &'static str = "/api/screens";

    type Filters = ScreenFilters;
    type Submit = ScreenSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Screen {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.theatre.validate_at(&mut errors, "theatre");
        text_length(&mut errors, "name", &self.name, 1, 50);
        at_least(&mut errors, "capacity", self.capacity, 1);

        if let Some(seats) = self.seat_count {
            if seats > self.capacity {
                errors.push("seatCount", "Cannot exceed the screen capacity");
            }
        }

        errors.into_result()
    }
}

/// Form payload for creating or updating a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSubmit {
    /// Theatre ID
    pub theatre: String,
    pub name: String,
    pub capacity: u32,
    pub screen_type: ScreenType,
}

impl Validate for ScreenSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "theatre", &self.theatre);
        text_length(&mut errors, "name", &self.name, 1, 50);
        at_least(&mut errors, "capacity", self.capacity, 1);
        errors.into_result()
    }
}

/// List filters for screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenFilters {
    /// Theatre ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theatre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<ScreenType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_name: Option<SortDirection>,
}

impl Validate for ScreenFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen(capacity: u32, seat_count: Option<u32>) -> Screen {
        Screen {
            id: "s1".to_string(),
            theatre: EntityRef::Id("t1".to_string()),
            name: "Screen 1".to_string(),
            capacity,
            screen_type: ScreenType::TwoD,
            seat_count,
        }
    }

    #[test]
    fn test_screen_type_wire_names() {
        assert_eq!(serde_json::to_value(ScreenType::TwoD).unwrap(), json!("2D"));
        assert_eq!(serde_json::to_value(ScreenType::FourDx).unwrap(), json!("4DX"));

        let parsed: ScreenType = serde_json::from_value(json!("SCREEN_X")).unwrap();
        assert_eq!(parsed, ScreenType::ScreenX);
        assert_eq!(parsed.as_str(), "SCREEN_X");

        assert!(serde_json::from_value::<ScreenType>(json!("ScreenX")).is_err());
    }

    #[test]
    fn test_record_from_api() {
        let raw = json!({
            "_id": "s1",
            "theatre": "t1",
            "name": "Hall A",
            "capacity": 120,
            "screenType": "IMAX",
            "seatCount": 118
        });
        let screen: Screen = serde_json::from_value(raw).unwrap();
        assert_eq!(screen.screen_type, ScreenType::Imax);
        assert!(screen.validate().is_ok());
    }

    #[test]
    fn test_capacity_must_be_positive() {
        let errors = screen(0, None).validate().unwrap_err();
        assert!(errors.has_path("capacity"));

        let submit = ScreenSubmit {
            theatre: "t1".to_string(),
            name: "Hall A".to_string(),
            capacity: 0,
            screen_type: ScreenType::ThreeD,
        };
        assert!(submit.validate().unwrap_err().has_path("capacity"));
    }

    #[test]
    fn test_seat_count_within_capacity() {
        assert!(screen(100, Some(100)).validate().is_ok());

        let errors = screen(100, Some(101)).validate().unwrap_err();
        assert_eq!(
            errors.messages_for("seatCount"),
            vec!["Cannot exceed the screen capacity"]
        );
    }
}
