//! Shapes shared by several entities.

use serde::{Deserialize, Deserializer, Serialize};

use super::Entity;
use crate::validation::{required_text, ValidationErrors};

/// A reference to another entity: its ID, or the full record when the
/// request asked the server to populate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef<T> {
    Id(String),
    Populated(Box<T>),
}

impl<T: Entity> EntityRef<T> {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated(entity) => entity.id(),
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated(entity) => Some(entity),
        }
    }

    /// Validate the reference: a non-empty ID or a valid nested record.
    pub fn validate_at(&self, errors: &mut ValidationErrors, path: &str) {
        match self {
            EntityRef::Id(id) => required_text(errors, path, id),
            EntityRef::Populated(entity) => errors.nest(path, entity.validate()),
        }
    }
}

impl<T> From<&str> for EntityRef<T> {
    fn from(id: &str) -> Self {
        EntityRef::Id(id.to_string())
    }
}

/// Sort order for list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One page of results from a `/paginated` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub total_items: u64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    /// Number of pages needed for `total_items` at `per_page` items each.
    pub fn total_pages(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(per_page))
    }
}

/// Accept a boolean filter either as JSON `true`/`false` or as the strings
/// `"true"`/`"false"` found in URL query parameters.
pub fn bool_from_param<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Param {
        Bool(bool),
        Text(String),
    }

    match Option::<Param>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Param::Bool(value)) => Ok(Some(value)),
        Some(Param::Text(text)) => match text.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            "" => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "expected true or false, got {other:?}"
            ))),
        },
    }
}

/// Whether a credit or role belongs to the cast or the crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Cast,
    Crew,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cast => "CAST",
            Department::Crew => "CREW",
        }
    }
}
