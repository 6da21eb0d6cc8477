//! Query-string construction for entity endpoints.
//!
//! Every list, lookup and query request goes through [`QueryParams`], which
//! drops attributes that are absent, `null` or an empty string before
//! serialization.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::errors::AppError;

/// Server-side expansion flags shared by every read and mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Expand referenced IDs into nested objects
    pub populate: Option<bool>,
    /// Include server-computed attributes
    pub virtuals: Option<bool>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(mut self, populate: bool) -> Self {
        self.populate = Some(populate);
        self
    }

    pub fn virtuals(mut self, virtuals: bool) -> Self {
        self.virtuals = Some(virtuals);
        self
    }
}

/// Page selection for `/paginated` endpoints. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: u32 = 25;

    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// Ordered key/value pairs destined for a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw pair. Empty values are dropped.
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
    }

    /// Append `page` and `perPage`.
    pub fn push_pagination(&mut self, pagination: Pagination) {
        self.push("page", pagination.page.to_string());
        self.push("perPage", pagination.per_page.to_string());
    }

    /// Append `populate` and `virtuals` when they were set.
    pub fn push_options(&mut self, options: RequestOptions) {
        if let Some(populate) = options.populate {
            self.push("populate", populate.to_string());
        }
        if let Some(virtuals) = options.virtuals {
            self.push("virtuals", virtuals.to_string());
        }
    }

    /// Flatten a serializable filter object into pairs, in field order.
    ///
    /// The value must serialize to a JSON object (or `null`, which adds
    /// nothing).
    pub fn push_serialized<S>(&mut self, filters: &S) -> Result<(), AppError>
    where
        S: Serialize + ?Sized,
    {
        match serde_json::to_value(filters)? {
            Value::Null => Ok(()),
            Value::Object(map) => {
                for (key, value) in &map {
                    self.push_value(key, value);
                }
                Ok(())
            }
            other => Err(AppError::BadRequest(format!(
                "query filters must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn push_value(&mut self, key: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(s) => self.push(key, s.as_str()),
            Value::Bool(b) => self.push(key, b.to_string()),
            Value::Number(n) => self.push(key, n.to_string()),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Array(_) | Value::Object(_) => self.push(key, item.to_string()),
                        _ => self.push_value(key, item),
                    }
                }
            }
            Value::Object(map) if map.is_empty() => {}
            Value::Object(_) => self.push(key, value.to_string()),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encode the pairs (`application/x-www-form-urlencoded`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Join a base path and an endpoint path, appending the query string when
/// there is one.
pub fn build_query_url(base_path: &str, path: &str, params: &QueryParams) -> String {
    let mut url = format!("{}{}", base_path.trim_end_matches('/'), path);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.to_query_string());
    }
    url
}

/// Decode a query string (with or without the leading `?`) into pairs.
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        title: Option<String>,
        is_released: Option<bool>,
        genres: Vec<String>,
    }

    #[test]
    fn test_empty_title_dropped_with_populate() {
        let mut params = QueryParams::new();
        params.push_serialized(&json!({ "title": "" })).unwrap();
        params.push_options(RequestOptions::new().populate(true));

        assert_eq!(
            build_query_url("/api/movies", "/all", &params),
            "/api/movies/all?populate=true"
        );
    }

    #[test]
    fn test_strips_null_and_absent() {
        let mut params = QueryParams::new();
        params
            .push_serialized(&Filters {
                title: None,
                is_released: Some(false),
                genres: vec![],
            })
            .unwrap();
        params.push_serialized(&json!({ "name": null, "country": "FR" })).unwrap();

        assert_eq!(params.to_query_string(), "isReleased=false&country=FR");
    }

    #[test]
    fn test_arrays_repeat_keys() {
        let mut params = QueryParams::new();
        params
            .push_serialized(&json!({ "genres": ["g1", "", "g2"] }))
            .unwrap();
        assert_eq!(params.to_query_string(), "genres=g1&genres=g2");
    }

    #[test]
    fn test_nested_objects_sent_as_json() {
        let mut params = QueryParams::new();
        params
            .push_serialized(&json!({ "range": { "min": 1 }, "empty": {} }))
            .unwrap();
        assert_eq!(params.pairs(), &[("range".to_string(), "{\"min\":1}".to_string())]);
    }

    #[test]
    fn test_non_object_filters_rejected() {
        let mut params = QueryParams::new();
        assert!(params.push_serialized(&json!(["a"])).is_err());
        assert!(params.push_serialized(&json!(null)).is_ok());
        assert!(params.is_empty());
    }

    #[test]
    fn test_no_query_string_when_empty() {
        assert_eq!(
            build_query_url("/api/genres/", "/get/abc", &QueryParams::new()),
            "/api/genres/get/abc"
        );
    }

    #[test]
    fn test_round_trip_keeps_non_empty_keys() {
        let filters = json!({
            "title": "Amélie & Co",
            "director": "",
            "isReleased": true,
            "country": null,
        });
        let mut params = QueryParams::new();
        params.push_serialized(&filters).unwrap();
        let url = build_query_url("/api/movies", "/all", &params);

        let query = url.split_once('?').map(|(_, q)| q).unwrap();
        let decoded = decode_query(query);
        assert_eq!(
            decoded,
            vec![
                ("title".to_string(), "Amélie & Co".to_string()),
                ("isReleased".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_pagination_precedes_options() {
        let mut params = QueryParams::new();
        params.push_pagination(Pagination::new(3, 10));
        params.push_options(RequestOptions::new().populate(false).virtuals(true));
        assert_eq!(
            params.to_query_string(),
            "page=3&perPage=10&populate=false&virtuals=true"
        );
    }

    #[test]
    fn test_decode_accepts_leading_question_mark() {
        assert_eq!(
            decode_query("?a=1&b=two+words"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
            ]
        );
    }
}
