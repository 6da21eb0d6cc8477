//! Typed entity services.
//!
//! [`EntityService`] pairs a [`RequestRepository`] with the entity's schema:
//! responses are validated through [`parse_entity`], and form payloads are
//! validated before a mutation is sent.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    Entity, Genre, Movie, MovieCredit, Paginated, Person, Reservation, RoleType, Screen, Seat,
    SeatMap, Showing, Theatre, User,
};
use crate::query::{Pagination, RequestOptions};
use crate::repository::{ApiClient, RequestRepository};
use crate::validation::{parse_entities, parse_entity, Validate, ValidationErrors};

/// Validated CRUD operations for one entity type.
pub struct EntityService<T: Entity> {
    repo: RequestRepository,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for EntityService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService")
            .field("entity", &T::NAME)
            .field("base_path", &self.repo.base_path())
            .finish()
    }
}

impl<T: Entity> EntityService<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repo: RequestRepository::new(client, T::BASE_PATH),
            _entity: PhantomData,
        }
    }

    /// The untyped repository underneath, for callers that need raw shapes.
    pub fn repository(&self) -> &RequestRepository {
        &self.repo
    }

    /// Fetch every record matching `filters`.
    pub async fn fetch_all(
        &self,
        filters: &T::Filters,
        options: RequestOptions,
    ) -> Result<Vec<T>, AppError> {
        let raw: Value = self.repo.get_all(filters, options).await?;
        parse_entities(T::NAME, raw)
    }

    /// Fetch one page of records matching `filters`.
    pub async fn fetch_paginated(
        &self,
        pagination: Pagination,
        filters: &T::Filters,
        options: RequestOptions,
    ) -> Result<Paginated<T>, AppError> {
        let raw: Value = self.repo.paginated(pagination, filters, options).await?;

        let page: Paginated<Value> = serde_json::from_value(raw).map_err(|e| {
            tracing::error!(entity = T::NAME, "Invalid paginated response: {}", e);
            AppError::InvalidData {
                entity: T::NAME,
                issues: ValidationErrors::single("", e.to_string()),
            }
        })?;

        Ok(Paginated {
            total_items: page.total_items,
            items: parse_entities(T::NAME, Value::Array(page.items))?,
        })
    }

    /// Fetch one record by ID.
    pub async fn fetch_one(&self, id: &str, options: RequestOptions) -> Result<T, AppError> {
        let raw: Value = self.repo.get(id, options).await?;
        parse_entity(T::NAME, raw)
    }

    /// Validate and submit a new record.
    pub async fn create(
        &self,
        submit: &T::Submit,
        options: RequestOptions,
    ) -> Result<T, AppError> {
        validate_submission::<T, _>(submit)?;
        let raw: Value = self.repo.create(submit, options).await?;
        tracing::info!(entity = T::NAME, "Created record");
        parse_entity(T::NAME, raw)
    }

    /// Validate and submit a full replacement of a record's editable fields.
    pub async fn update(
        &self,
        id: &str,
        submit: &T::Submit,
        options: RequestOptions,
    ) -> Result<T, AppError> {
        validate_submission::<T, _>(submit)?;
        let raw: Value = self.repo.update(id, submit, options).await?;
        tracing::info!(entity = T::NAME, id, "Updated record");
        parse_entity(T::NAME, raw)
    }

    /// Send only the changed fields.
    ///
    /// `changes` is laid over `current` (top-level keys replace) and the
    /// result must pass the same checks as [`update`](Self::update) before
    /// the patch is sent. The server response is still validated.
    pub async fn update_partial(
        &self,
        id: &str,
        current: &T::Submit,
        changes: &Map<String, Value>,
        options: RequestOptions,
    ) -> Result<T, AppError> {
        if changes.is_empty() {
            return Err(AppError::BadRequest("No changes provided".to_string()));
        }
        let merged = apply_patch::<T>(current, changes)?;
        validate_submission::<T, _>(&merged)?;

        let raw: Value = self.repo.update(id, changes, options).await?;
        tracing::info!(entity = T::NAME, id, fields = changes.len(), "Patched record");
        parse_entity(T::NAME, raw)
    }

    /// Delete a record by ID.
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(entity = T::NAME, id, "Deleted record");
        Ok(())
    }

    /// Run an arbitrary filter query and validate the matching records.
    pub async fn query<Q>(&self, queries: &Q) -> Result<Vec<T>, AppError>
    where
        Q: Serialize + ?Sized,
    {
        let raw: Value = self.repo.query(queries).await?;
        parse_entities(T::NAME, raw)
    }
}

/// The form values `current` would hold after `changes` are applied.
fn apply_patch<T: Entity>(
    current: &T::Submit,
    changes: &Map<String, Value>,
) -> Result<T::Submit, AppError> {
    let mut fields = match serde_json::to_value(current)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    for (key, value) in changes {
        fields.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        tracing::debug!(entity = T::NAME, "Patch does not fit the form: {}", e);
        AppError::Validation(ValidationErrors::single("", e.to_string()))
    })
}

fn validate_submission<T: Entity, S: Validate>(submit: &S) -> Result<(), AppError> {
    submit.validate().map_err(|errors| {
        tracing::debug!(entity = T::NAME, %errors, "Blocked invalid submission");
        AppError::Validation(errors)
    })
}

/// Entry point handing out one service per entity, all sharing one client.
#[derive(Debug, Clone)]
pub struct CinemaApi {
    client: ApiClient,
}

impl CinemaApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Service for any entity type.
    pub fn service<T: Entity>(&self) -> EntityService<T> {
        EntityService::new(self.client.clone())
    }

    pub fn movies(&self) -> EntityService<Movie> {
        self.service()
    }

    pub fn genres(&self) -> EntityService<Genre> {
        self.service()
    }

    pub fn persons(&self) -> EntityService<Person> {
        self.service()
    }

    pub fn role_types(&self) -> EntityService<RoleType> {
        self.service()
    }

    pub fn theatres(&self) -> EntityService<Theatre> {
        self.service()
    }

    pub fn screens(&self) -> EntityService<Screen> {
        self.service()
    }

    pub fn seats(&self) -> EntityService<Seat> {
        self.service()
    }

    pub fn seat_maps(&self) -> EntityService<SeatMap> {
        self.service()
    }

    pub fn showings(&self) -> EntityService<Showing> {
        self.service()
    }

    pub fn reservations(&self) -> EntityService<Reservation> {
        self.service()
    }

    pub fn movie_credits(&self) -> EntityService<MovieCredit> {
        self.service()
    }

    pub fn users(&self) -> EntityService<User> {
        self.service()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenreSubmit;
    use serde_json::json;

    #[test]
    fn test_services_bind_entity_base_paths() {
        let api = CinemaApi::new(ApiClient::new("http://localhost:4000").unwrap());
        let paths = [
            api.movies().repository().base_path().to_string(),
            api.genres().repository().base_path().to_string(),
            api.persons().repository().base_path().to_string(),
            api.role_types().repository().base_path().to_string(),
            api.theatres().repository().base_path().to_string(),
            api.screens().repository().base_path().to_string(),
            api.seats().repository().base_path().to_string(),
            api.seat_maps().repository().base_path().to_string(),
            api.showings().repository().base_path().to_string(),
            api.reservations().repository().base_path().to_string(),
            api.movie_credits().repository().base_path().to_string(),
            api.users().repository().base_path().to_string(),
        ];
        assert_eq!(
            paths,
            [
                "/api/movies",
                "/api/genres",
                "/api/persons",
                "/api/roletypes",
                "/api/theatres",
                "/api/screens",
                "/api/seats",
                "/api/seatmaps",
                "/api/showings",
                "/api/reservations",
                "/api/moviecredits",
                "/api/users",
            ]
        );
    }

    #[test]
    fn test_apply_patch_overlays_changes() {
        let current = GenreSubmit {
            name: "Noir".to_string(),
            description: Some("Shadows".to_string()),
        };
        let changes = json!({ "description": "Hard-boiled crime" });

        let merged = apply_patch::<Genre>(&current, changes.as_object().unwrap()).unwrap();
        assert_eq!(merged.name, "Noir");
        assert_eq!(merged.description.as_deref(), Some("Hard-boiled crime"));
    }

    #[test]
    fn test_apply_patch_rejects_wrong_shape() {
        let current = GenreSubmit {
            name: "Noir".to_string(),
            description: None,
        };
        let changes = json!({ "name": null });

        let err = apply_patch::<Genre>(&current, changes.as_object().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), crate::errors::codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_debug_names_entity() {
        let api = CinemaApi::new(ApiClient::new("http://localhost:4000").unwrap());
        let debug = format!("{:?}", api.showings());
        assert!(debug.contains("Showing"));
        assert!(debug.contains("/api/showings"));
    }
}
