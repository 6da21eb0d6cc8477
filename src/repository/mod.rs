//! Generic request repository: one CRUD+query surface for every entity.
//!
//! A repository is bound to a base path such as `/api/movies` and maps each
//! operation onto a fixed suffix:
//!
//! | Operation  | Method | Path            |
//! |------------|--------|-----------------|
//! | `get_all`  | GET    | `/all`          |
//! | `paginated`| GET    | `/paginated`    |
//! | `get`      | GET    | `/get/{id}`     |
//! | `create`   | POST   | `/create`       |
//! | `update`   | PATCH  | `/update/{id}`  |
//! | `delete`   | DELETE | `/delete/{id}`  |
//! | `query`    | GET    | `/query`        |
//!
//! Responses are decoded into whatever shape the caller asks for; no schema
//! validation happens here. Failures are returned as-is: no retry, no cache.

mod client;

pub use client::*;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::errors::AppError;
use crate::query::{build_query_url, Pagination, QueryParams, RequestOptions};

/// Request repository bound to one entity endpoint.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    client: ApiClient,
    base_path: String,
}

impl RequestRepository {
    pub fn new(client: ApiClient, base_path: impl Into<String>) -> Self {
        Self {
            client,
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ==================== URL BUILDERS ====================

    /// URL for `get_all`.
    pub fn all_url<F>(&self, filters: &F, options: RequestOptions) -> Result<String, AppError>
    where
        F: Serialize + ?Sized,
    {
        let mut params = QueryParams::new();
        params.push_serialized(filters)?;
        params.push_options(options);
        Ok(build_query_url(&self.base_path, "/all", &params))
    }

    /// URL for `paginated`.
    pub fn paginated_url<F>(
        &self,
        pagination: Pagination,
        filters: &F,
        options: RequestOptions,
    ) -> Result<String, AppError>
    where
        F: Serialize + ?Sized,
    {
        let mut params = QueryParams::new();
        params.push_pagination(pagination);
        params.push_serialized(filters)?;
        params.push_options(options);
        Ok(build_query_url(&self.base_path, "/paginated", &params))
    }

    /// URL for `get`.
    pub fn get_url(&self, id: &str, options: RequestOptions) -> Result<String, AppError> {
        let id = id_segment(id)?;
        let mut params = QueryParams::new();
        params.push_options(options);
        Ok(build_query_url(&self.base_path, &format!("/get/{id}"), &params))
    }

    /// URL for `create`.
    pub fn create_url(&self, options: RequestOptions) -> String {
        let mut params = QueryParams::new();
        params.push_options(options);
        build_query_url(&self.base_path, "/create", &params)
    }

    /// URL for `update`.
    pub fn update_url(&self, id: &str, options: RequestOptions) -> Result<String, AppError> {
        let id = id_segment(id)?;
        let mut params = QueryParams::new();
        params.push_options(options);
        Ok(build_query_url(&self.base_path, &format!("/update/{id}"), &params))
    }

    /// URL for `delete`.
    pub fn delete_url(&self, id: &str) -> Result<String, AppError> {
        let id = id_segment(id)?;
        Ok(build_query_url(
            &self.base_path,
            &format!("/delete/{id}"),
            &QueryParams::new(),
        ))
    }

    /// URL for `query`.
    pub fn query_url<Q>(&self, queries: &Q) -> Result<String, AppError>
    where
        Q: Serialize + ?Sized,
    {
        let mut params = QueryParams::new();
        params.push_serialized(queries)?;
        Ok(build_query_url(&self.base_path, "/query", &params))
    }

    // ==================== OPERATIONS ====================

    /// GET `{base}/all` with the non-empty filters.
    pub async fn get_all<R, F>(&self, filters: &F, options: RequestOptions) -> Result<R, AppError>
    where
        R: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let url = self.all_url(filters, options)?;
        self.client.send_json(Method::GET, &url, NO_BODY).await
    }

    /// GET `{base}/paginated` for one page of results.
    pub async fn paginated<R, F>(
        &self,
        pagination: Pagination,
        filters: &F,
        options: RequestOptions,
    ) -> Result<R, AppError>
    where
        R: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let url = self.paginated_url(pagination, filters, options)?;
        self.client.send_json(Method::GET, &url, NO_BODY).await
    }

    /// GET `{base}/get/{id}`.
    pub async fn get<R>(&self, id: &str, options: RequestOptions) -> Result<R, AppError>
    where
        R: DeserializeOwned,
    {
        let url = self.get_url(id, options)?;
        self.client.send_json(Method::GET, &url, NO_BODY).await
    }

    /// POST `{base}/create` with `data` as the body.
    pub async fn create<R, D>(&self, data: &D, options: RequestOptions) -> Result<R, AppError>
    where
        R: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let url = self.create_url(options);
        self.client.send_json(Method::POST, &url, Some(data)).await
    }

    /// PATCH `{base}/update/{id}` with `data` as the body.
    pub async fn update<R, D>(
        &self,
        id: &str,
        data: &D,
        options: RequestOptions,
    ) -> Result<R, AppError>
    where
        R: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let url = self.update_url(id, options)?;
        self.client.send_json(Method::PATCH, &url, Some(data)).await
    }

    /// DELETE `{base}/delete/{id}`. Sends no body; the response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let url = self.delete_url(id)?;
        self.client.send(Method::DELETE, &url, NO_BODY).await?;
        Ok(())
    }

    /// GET `{base}/query` with an arbitrary filter object.
    pub async fn query<R, Q>(&self, queries: &Q) -> Result<R, AppError>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.query_url(queries)?;
        self.client.send_json(Method::GET, &url, NO_BODY).await
    }
}

const NO_BODY: Option<&()> = None;

/// Percent-encode an ID as exactly one path segment, so `/`, `?` and `#`
/// inside it cannot change the endpoint.
fn id_segment(id: &str) -> Result<String, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("An entity ID is required".to_string()));
    }
    // Dot segments are dropped by URL normalisation
    if id == "." || id == ".." {
        return Err(AppError::BadRequest(format!("Invalid entity ID: {id}")));
    }

    let mut url = Url::parse("http://localhost/")
        .map_err(|e| AppError::BadRequest(format!("Invalid entity ID: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::BadRequest(format!("Invalid entity ID: {id}")))?
        .pop_if_empty()
        .push(id);

    Ok(url.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movies() -> RequestRepository {
        let client = ApiClient::new("http://localhost:4000").unwrap();
        RequestRepository::new(client, "/api/movies")
    }

    #[test]
    fn test_all_url_drops_empty_title() {
        let url = movies()
            .all_url(&json!({ "title": "" }), RequestOptions::new().populate(true))
            .unwrap();
        assert_eq!(url, "/api/movies/all?populate=true");
    }

    #[test]
    fn test_paginated_url() {
        let url = movies()
            .paginated_url(
                Pagination::new(2, 20),
                &json!({ "title": "Alien", "country": null }),
                RequestOptions::new().virtuals(true),
            )
            .unwrap();
        assert_eq!(
            url,
            "/api/movies/paginated?page=2&perPage=20&title=Alien&virtuals=true"
        );
    }

    #[test]
    fn test_id_urls_use_literal_id() {
        let repo = movies();
        assert_eq!(
            repo.get_url("65f1c0ffee", RequestOptions::new()).unwrap(),
            "/api/movies/get/65f1c0ffee"
        );
        assert_eq!(
            repo.update_url("65f1c0ffee", RequestOptions::new().populate(true))
                .unwrap(),
            "/api/movies/update/65f1c0ffee?populate=true"
        );
        assert_eq!(repo.delete_url("65f1c0ffee").unwrap(), "/api/movies/delete/65f1c0ffee");
    }

    #[test]
    fn test_id_is_encoded_as_one_segment() {
        let repo = movies();
        assert_eq!(
            repo.delete_url("a/../../users/delete/u9").unwrap(),
            "/api/movies/delete/a%2F..%2F..%2Fusers%2Fdelete%2Fu9"
        );
        assert_eq!(
            repo.get_url("m1?populate=false", RequestOptions::new().populate(true))
                .unwrap(),
            "/api/movies/get/m1%3Fpopulate=false?populate=true"
        );
        assert_eq!(
            repo.update_url("x#frag", RequestOptions::new()).unwrap(),
            "/api/movies/update/x%23frag"
        );
    }

    #[test]
    fn test_dot_ids_rejected() {
        let repo = movies();
        assert!(matches!(repo.delete_url(".."), Err(AppError::BadRequest(_))));
        assert!(matches!(
            repo.get_url(".", RequestOptions::new()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_empty_id_rejected() {
        let repo = movies();
        assert!(matches!(
            repo.get_url(" ", RequestOptions::new()),
            Err(AppError::BadRequest(_))
        ));
        assert!(repo.delete_url("").is_err());
    }

    #[test]
    fn test_query_and_create_urls() {
        let repo = movies();
        assert_eq!(
            repo.query_url(&json!({ "genres": ["a", "b"], "title": "" })).unwrap(),
            "/api/movies/query?genres=a&genres=b"
        );
        assert_eq!(repo.create_url(RequestOptions::new()), "/api/movies/create");
    }
}
