//! Error handling module for the cinema admin data layer.
//!
//! Provides one error type covering transport failures, invalid server data,
//! form validation and URL parameter validation, with stable codes and
//! user-facing messages.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const INVALID_DATA: &str = "INVALID_DATA";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const JSON_ERROR: &str = "JSON_ERROR";
}

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Http { status: StatusCode, message: String },
    /// The server answered, but the payload does not match the entity schema
    #[error("invalid {entity} data: {issues}")]
    InvalidData {
        entity: &'static str,
        issues: ValidationErrors,
    },
    /// A form payload failed validation before submission
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// URL search parameters could not be parsed or validated
    #[error("invalid URL parameters: {issues}")]
    InvalidParams { issues: ValidationErrors },
    /// The caller passed an unusable argument
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
    /// A request body could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Http { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => codes::UNAUTHORIZED,
                StatusCode::NOT_FOUND => codes::NOT_FOUND,
                _ => codes::HTTP_ERROR,
            },
            AppError::InvalidData { .. } => codes::INVALID_DATA,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidParams { .. } => codes::INVALID_PARAMS,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Json(_) => codes::JSON_ERROR,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AppError::Http { status, message } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "You are not allowed to do that.".to_string()
                }
                StatusCode::NOT_FOUND => "The requested record no longer exists.".to_string(),
                _ if message.is_empty() => format!("Request failed ({status})."),
                _ => message.clone(),
            },
            AppError::InvalidData { entity, .. } => {
                format!("The server sent invalid {entity} data.")
            }
            AppError::Validation(_) => "Please fix the highlighted fields.".to_string(),
            AppError::InvalidParams { .. } => "The page address contains invalid filters.".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Json(_) => "Could not encode the request.".to_string(),
        }
    }

    /// Field-level messages keyed by field path, for attaching to form inputs.
    ///
    /// Only form and URL parameter failures carry field errors.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let AppError::Validation(errors) | AppError::InvalidParams { issues: errors } = self {
            for issue in errors.issues() {
                fields
                    .entry(issue.path.clone())
                    .or_default()
                    .push(issue.message.clone());
            }
        }
        fields
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP transport error: {:?}", err);
        match err.status() {
            Some(status) => AppError::Http {
                status,
                message: err.to_string(),
            },
            None => AppError::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_codes() {
        let not_found = AppError::Http {
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        };
        assert_eq!(not_found.error_code(), codes::NOT_FOUND);
        assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));

        let unauthorized = AppError::Http {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(unauthorized.error_code(), codes::UNAUTHORIZED);

        let conflict = AppError::Http {
            status: StatusCode::CONFLICT,
            message: "Seat already reserved".to_string(),
        };
        assert_eq!(conflict.error_code(), codes::HTTP_ERROR);
        assert_eq!(conflict.user_message(), "Seat already reserved");
    }

    #[test]
    fn test_field_errors_group_by_path() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "Required");
        errors.push("runtime", "Must be greater than 0");
        errors.push("title", "Must be 250 characters or fewer");

        let err = AppError::Validation(errors);
        let fields = err.field_errors();
        assert_eq!(fields["title"].len(), 2);
        assert_eq!(fields["runtime"], vec!["Must be greater than 0"]);
        assert_eq!(err.error_code(), codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_field_errors_empty_for_other_variants() {
        let err = AppError::InvalidData {
            entity: "Movie",
            issues: ValidationErrors::single("title", "Required"),
        };
        assert!(err.field_errors().is_empty());
        assert_eq!(err.user_message(), "The server sent invalid Movie data.");
    }
}
