//! Cinema Admin data audit
//!
//! Fetches every collection from the configured API and checks each record
//! against its schema, logging the records the admin UI would reject.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinema_admin::models::{
    Entity, Genre, Movie, MovieCredit, Person, Reservation, RoleType, Screen, Seat, SeatMap,
    Showing, Theatre, User,
};
use cinema_admin::query::RequestOptions;
use cinema_admin::{AppError, CinemaApi, Config};

/// Outcome of auditing one collection.
enum Audit {
    Clean(usize),
    Invalid,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting cinema data audit");
    tracing::info!("API URL: {}", config.api_url);

    if config.api_key.is_none() {
        tracing::warn!("No API key configured (CINEMA_API_KEY). Requests are unauthenticated");
    }

    let api = match CinemaApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to build API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let results = [
        audit::<Genre>(&api).await,
        audit::<Person>(&api).await,
        audit::<RoleType>(&api).await,
        audit::<Movie>(&api).await,
        audit::<MovieCredit>(&api).await,
        audit::<Theatre>(&api).await,
        audit::<Screen>(&api).await,
        audit::<Seat>(&api).await,
        audit::<Showing>(&api).await,
        audit::<SeatMap>(&api).await,
        audit::<Reservation>(&api).await,
        audit::<User>(&api).await,
    ];

    let mut records = 0;
    let mut failures = 0;
    for result in results {
        match result {
            Ok(Audit::Clean(count)) => records += count,
            Ok(Audit::Invalid) | Err(_) => failures += 1,
        }
    }

    if failures > 0 {
        tracing::error!("Audit finished: {} collection(s) failed", failures);
        ExitCode::FAILURE
    } else {
        tracing::info!("Audit finished: {} records valid", records);
        ExitCode::SUCCESS
    }
}

/// Fetch one collection and report whether every record passed validation.
async fn audit<T: Entity>(api: &CinemaApi) -> Result<Audit, AppError> {
    let filters = T::Filters::default();
    match api.service::<T>().fetch_all(&filters, RequestOptions::new()).await {
        Ok(records) => {
            tracing::info!(entity = T::NAME, count = records.len(), "Collection valid");
            Ok(Audit::Clean(records.len()))
        }
        Err(AppError::InvalidData { issues, .. }) => {
            for issue in issues.issues() {
                tracing::warn!(entity = T::NAME, path = %issue.path, "{}", issue.message);
            }
            Ok(Audit::Invalid)
        }
        Err(e) => {
            tracing::error!(entity = T::NAME, code = e.error_code(), "Fetch failed: {}", e);
            Err(e)
        }
    }
}
