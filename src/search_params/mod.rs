//! List-page state carried in URL search parameters.
//!
//! A list page keeps its current page, page size and filters in the query
//! string so it can be bookmarked. [`ListPageState::parse`] reads that state
//! back and validates it; [`ListPageState::to_query_string`] writes it out.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::query::{decode_query, Pagination, QueryParams};
use crate::validation::{Validate, ValidationErrors};

/// Largest page size a list page may ask for.
pub const MAX_PER_PAGE: u32 = 100;

const PAGE_KEY: &str = "page";
const PER_PAGE_KEY: &str = "perPage";

/// Page number, page size and typed filters of a list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPageState<F> {
    pub page: u32,
    pub per_page: u32,
    pub filters: F,
}

impl<F: Default> Default for ListPageState<F> {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Pagination::DEFAULT_PER_PAGE,
            filters: F::default(),
        }
    }
}

impl<F> ListPageState<F>
where
    F: Serialize + DeserializeOwned + Validate + Default,
{
    pub fn new(filters: F) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Parse and validate a query string.
    pub fn parse(query: &str) -> Result<Self, AppError> {
        Self::parse_with(query, |_| {})
    }

    /// Like [`parse`](Self::parse), but hands a failure to `recover` before
    /// returning it, e.g. to reset the page to defaults.
    pub fn parse_with<R>(query: &str, recover: R) -> Result<Self, AppError>
    where
        R: FnOnce(&AppError),
    {
        let mut errors = ValidationErrors::new();
        let mut page = 1;
        let mut per_page = Pagination::DEFAULT_PER_PAGE;
        let mut fields = Map::new();

        for (key, value) in decode_query(query) {
            match key.as_str() {
                PAGE_KEY => page = parse_positive(&mut errors, PAGE_KEY, &value, page),
                PER_PAGE_KEY => {
                    per_page = parse_positive(&mut errors, PER_PAGE_KEY, &value, per_page);
                    if per_page > MAX_PER_PAGE {
                        errors.push(PER_PAGE_KEY, format!("Must be at most {MAX_PER_PAGE}"));
                    }
                }
                _ if value.is_empty() => {}
                _ => insert_param(&mut fields, &key, value),
            }
        }

        let filters = match serde_json::from_value::<F>(Value::Object(fields)) {
            Ok(filters) => {
                errors.nest("", filters.validate());
                filters
            }
            Err(e) => {
                errors.push("", e.to_string());
                F::default()
            }
        };

        if !errors.is_empty() {
            tracing::warn!(query, %errors, "Rejected list page parameters");
            let err = AppError::InvalidParams { issues: errors };
            recover(&err);
            return Err(err);
        }

        Ok(Self {
            page,
            per_page,
            filters,
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    /// Move to another page, keeping size and filters.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Replace the filters. A filter change always returns to the first page.
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self.page = 1;
        self
    }

    /// Write the state as a query string, dropping empty filters.
    pub fn to_query_string(&self) -> Result<String, AppError> {
        let mut params = QueryParams::new();
        params.push_pagination(self.pagination());
        params.push_serialized(&self.filters)?;
        Ok(params.to_query_string())
    }
}

fn parse_positive(errors: &mut ValidationErrors, key: &str, value: &str, fallback: u32) -> u32 {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            errors.push(key, "Must be a positive whole number");
            fallback
        }
    }
}

/// Repeated keys collect into a list in order of appearance.
fn insert_param(fields: &mut Map<String, Value>, key: &str, value: String) {
    match fields.get_mut(key) {
        None => {
            fields.insert(key.to_string(), Value::String(value));
        }
        Some(Value::Array(items)) => items.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
    }
}
