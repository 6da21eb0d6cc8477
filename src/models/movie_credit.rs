//! Movie credit model.
//!
//! A credit is discriminated on `department`: cast credits carry character
//! details, crew credits carry a job title. Which optional fields belong to
//! which department is declared once in [`CREDIT_FIELDS`]; form visibility
//! and validation both read from that table.

use serde::{Deserialize, Serialize};

use super::{Department, Entity, EntityRef, Movie, Person, RoleType, SortDirection};
use crate::validation::{optional_max_chars, required_text, Validate, ValidationErrors, REQUIRED};

/// A department-specific credit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditField {
    /// JSON / form field name
    pub name: &'static str,
    pub department: Department,
    /// Whether the field must be filled in for its department
    pub required: bool,
}

/// Every field that only applies to one department.
pub const CREDIT_FIELDS: &[CreditField] = &[
    CreditField { name: "characterName", department: Department::Cast, required: true },
    CreditField { name: "billingOrder", department: Department::Cast, required: false },
    CreditField { name: "isPrimary", department: Department::Cast, required: false },
    CreditField { name: "uncredited", department: Department::Cast, required: false },
    CreditField { name: "voiceOnly", department: Department::Cast, required: false },
    CreditField { name: "cameo", department: Department::Cast, required: false },
    CreditField { name: "motionCapture", department: Department::Cast, required: false },
    CreditField { name: "jobTitle", department: Department::Crew, required: false },
];

/// Department-specific fields shown on the credit form for `department`.
pub fn active_fields(department: Department) -> impl Iterator<Item = &'static CreditField> {
    CREDIT_FIELDS
        .iter()
        .filter(move |field| field.department == department)
}

/// The department-specific values of a credit. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRoleFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncredited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cameo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_capture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl CreditRoleFields {
    /// Whether the named field holds a value. Blank text counts as empty.
    pub fn is_set(&self, name: &str) -> bool {
        match name {
            "characterName" => has_text(&self.character_name),
            "billingOrder" => self.billing_order.is_some(),
            "isPrimary" => self.is_primary.is_some(),
            "uncredited" => self.uncredited.is_some(),
            "voiceOnly" => self.voice_only.is_some(),
            "cameo" => self.cameo.is_some(),
            "motionCapture" => self.motion_capture.is_some(),
            "jobTitle" => has_text(&self.job_title),
            _ => false,
        }
    }

    fn is_present(&self, name: &str) -> bool {
        match name {
            "characterName" => self.character_name.is_some(),
            "jobTitle" => self.job_title.is_some(),
            _ => self.is_set(name),
        }
    }

    /// Check these fields against the table for `department`.
    pub fn check(&self, errors: &mut ValidationErrors, department: Department) {
        for field in CREDIT_FIELDS {
            if field.department == department {
                if field.required && !self.is_set(field.name) {
                    errors.push(field.name, REQUIRED);
                }
            } else if self.is_present(field.name) {
                errors.push(
                    field.name,
                    format!("Not allowed for {} credits", department.as_str()),
                );
            }
        }

        optional_max_chars(errors, "characterName", self.character_name.as_deref(), 250);
        optional_max_chars(errors, "jobTitle", self.job_title.as_deref(), 250);
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

/// A person's credit on a movie, as cast or crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCredit {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie: EntityRef<Movie>,
    pub person: EntityRef<Person>,
    pub role_type: EntityRef<RoleType>,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub role: CreditRoleFields,
}

impl MovieCredit {
    pub fn is_cast(&self) -> bool {
        self.department == Department::Cast
    }
}

impl Entity for MovieCredit {
    const NAME: &'static str = "MovieCredit";
    const BASE_PATH: &'static str = "/api/moviecredits";

    type Filters = MovieCreditFilters;
    type Submit = MovieCreditSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for MovieCredit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.movie.validate_at(&mut errors, "movie");
        self.person.validate_at(&mut errors, "person");
        self.role_type.validate_at(&mut errors, "roleType");

        if let Some(role_type) = self.role_type.populated() {
            if role_type.department != self.department {
                errors.push("roleType", "Role type belongs to a different department");
            }
        }

        optional_max_chars(&mut errors, "displayRoleName", self.display_role_name.as_deref(), 250);
        optional_max_chars(&mut errors, "notes", self.notes.as_deref(), 1000);
        self.role.check(&mut errors, self.department);
        errors.into_result()
    }
}

/// Form payload for creating or updating a credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCreditSubmit {
    /// Movie ID
    pub movie: String,
    /// Person ID
    pub person: String,
    /// Role type ID
    pub role_type: String,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub role: CreditRoleFields,
}

impl Validate for MovieCreditSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required_text(&mut errors, "movie", &self.movie);
        required_text(&mut errors, "person", &self.person);
        required_text(&mut errors, "roleType", &self.role_type);
        optional_max_chars(&mut errors, "displayRoleName", self.display_role_name.as_deref(), 250);
        optional_max_chars(&mut errors, "notes", self.notes.as_deref(), 1000);
        self.role.check(&mut errors, self.department);
        errors.into_result()
    }
}

/// List filters for credits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieCreditFilters {
    /// Movie ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    /// Person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    /// Role type ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_billing_order: Option<SortDirection>,
}

impl Validate for MovieCreditFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
