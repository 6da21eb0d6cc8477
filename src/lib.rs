//! Cinema Admin data layer
//!
//! Typed REST client for the movie-theatre ticketing admin: one generic
//! request repository, per-entity schemas with cross-field validation, and
//! URL search-parameter state for list pages.

pub mod config;
pub mod errors;
pub mod models;
pub mod query;
pub mod repository;
pub mod search_params;
pub mod services;
pub mod validation;

pub use config::Config;
pub use errors::AppError;
pub use services::{CinemaApi, EntityService};
