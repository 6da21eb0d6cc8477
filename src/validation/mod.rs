//! Schema validation for entity records, form payloads and URL state.
//!
//! Records are first deserialized with serde (shape), then checked with
//! [`Validate`] (refinements such as "release date required if released").
//! Both failures surface as the same typed error so callers can tell
//! malformed server data apart from transport failures.

mod rules;

pub use rules::*;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// A single failed constraint, addressed by its field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Dotted path to the offending field (`location.city`, `seating[1]`).
    /// Empty when the issue concerns the whole record.
    pub path: String,
    pub message: String,
}

/// Every issue found while validating one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error list holding one issue.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Whether any issue is attached to exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }

    /// Messages attached to `path`, in the order they were raised.
    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.path == path)
            .map(|issue| issue.message.as_str())
            .collect()
    }

    /// Fold the issues of a nested record in under `prefix`.
    pub fn nest(&mut self, prefix: &str, result: Result<(), ValidationErrors>) {
        if let Err(nested) = result {
            for issue in nested.issues {
                let path = join_path(prefix, &issue.path);
                self.issues.push(FieldIssue {
                    path,
                    message: issue.message,
                });
            }
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            if issue.path.is_empty() {
                write!(f, "{}", issue.message)?;
            } else {
                write!(f, "{}: {}", issue.path, issue.message)?;
            }
        }
        Ok(())
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if path.starts_with('[') => format!("{prefix}{path}"),
        (false, false) => format!("{prefix}.{path}"),
    }
}

/// Cross-field refinements applied after a value has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Deserialize and validate one server record.
///
/// Any mismatch is logged with the entity name and returned as
/// [`AppError::InvalidData`].
pub fn parse_entity<T>(entity: &'static str, value: Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_value(value).map_err(|e| {
        invalid_data(entity, ValidationErrors::single("", e.to_string()))
    })?;

    record
        .validate()
        .map_err(|issues| invalid_data(entity, issues))?;

    Ok(record)
}

/// Deserialize and validate a list of server records.
///
/// Issue paths are prefixed with the index of the failing record.
pub fn parse_entities<T>(entity: &'static str, value: Value) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Validate,
{
    let Value::Array(items) = value else {
        return Err(invalid_data(
            entity,
            ValidationErrors::single("", "Expected a list of records"),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    let mut errors = ValidationErrors::new();

    for (index, item) in items.into_iter().enumerate() {
        let prefix = format!("[{index}]");
        match serde_json::from_value::<T>(item) {
            Ok(record) => {
                errors.nest(&prefix, record.validate());
                records.push(record);
            }
            Err(e) => errors.push(prefix, e.to_string()),
        }
    }

    if !errors.is_empty() {
        return Err(invalid_data(entity, errors));
    }

    Ok(records)
}

fn invalid_data(entity: &'static str, issues: ValidationErrors) -> AppError {
    tracing::error!(entity, %issues, "Server returned invalid {} data", entity);
    AppError::InvalidData { entity, issues }
}
