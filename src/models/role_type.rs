//! Role type model.

use serde::{Deserialize, Serialize};

use super::{Department, Entity, SortDirection};
use crate::validation::{optional_max_chars, text_length, Validate, ValidationErrors};

/// A kind of credit, e.g. "Actor", "Director of Photography".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleType {
    #[serde(rename = "_id")]
    pub id: String,
    pub role_name: String,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for RoleType {
    const NAME: &'static str = "RoleType";
    const BASE_PATH: &'static str = "/api/roletypes";

    type Filters = RoleTypeFilters;
    type Submit = RoleTypeSubmit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for RoleType {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "roleName", &self.role_name, 1, 150);
        optional_max_chars(&mut errors, "description", self.description.as_deref(), 1000);
        errors.into_result()
    }
}

/// Form payload for creating or updating a role type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleTypeSubmit {
    pub role_name: String,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for RoleTypeSubmit {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        text_length(&mut errors, "roleName", &self.role_name, 1, 150);
        optional_max_chars(&mut errors, "description", self.description.as_deref(), 1000);
        errors.into_result()
    }
}

/// List filters for role types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleTypeFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_role_name: Option<SortDirection>,
}

impl Validate for RoleTypeFilters {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
