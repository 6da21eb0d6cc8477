//! Data models for the cinema admin.
//!
//! Each entity comes with its submit payload (what a form POSTs or PATCHes,
//! references as IDs) and its list filters. Field names match the API's
//! camelCase JSON.

mod common;
mod genre;
mod movie;
mod movie_credit;
mod person;
mod reservation;
mod role_type;
mod screen;
mod seat;
mod seat_map;
mod showing;
mod theatre;
mod user;

pub use common::*;
pub use genre::*;
pub use movie::*;
pub use movie_credit::*;
pub use person::*;
pub use reservation::*;
pub use role_type::*;
pub use screen::*;
pub use seat::*;
pub use seat_map::*;
pub use showing::*;
pub use theatre::*;
pub use user::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::validation::Validate;

/// A domain record served by one REST endpoint.
pub trait Entity: DeserializeOwned + Serialize + Validate + Send + Sync + 'static {
    /// Human readable name used in logs and error messages.
    const NAME: &'static str;
    /// Endpoint prefix, e.g. `/api/movies`.
    const BASE_PATH: &'static str;

    /// Typed list filters, also used as list-page URL state.
    type Filters: Serialize + DeserializeOwned + Validate + Default + Send + Sync;
    /// Form payload for create and update.
    type Submit: Serialize + DeserializeOwned + Validate + Send + Sync;

    fn id(&self) -> &str;
}
