#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crime dashboard.
//!
//! Serves the dashboard's two tabs as JSON: the informative tab (hour
//! histogram, street rankings, day/month counts, top offenses) and the
//! interactive tab (street frequency chart, filtered incident map, and
//! per-street analysis). The incident table is loaded once at startup and
//! shared read-only across workers.

mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use crime_dashboard_config::{ConfigError, DashboardConfig};
use crime_dashboard_dataset::{Dataset, LoadError, null_progress};

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The incident table could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// Loaded incident table.
    pub dataset: Dataset,
    /// Dashboard configuration (limits, map zoom).
    pub config: DashboardConfig,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/offenses", web::get().to(handlers::offenses))
            .route("/streets", web::get().to(handlers::streets))
            .route("/days", web::get().to(handlers::days))
            .route("/informative", web::get().to(handlers::informative))
            .route("/interactive", web::post().to(handlers::interactive))
            .route("/map", web::post().to(handlers::map))
            .route(
                "/street-frequency",
                web::post().to(handlers::street_frequency),
            )
            .route("/street-analysis", web::post().to(handlers::street_analysis)),
    );
}

/// Loads the incident table named by `config` and starts the server.
///
/// # Errors
///
/// Returns [`ServerError`] if the table cannot be loaded or the server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> Result<(), ServerError> {
    let dataset = Dataset::load(&config.dataset, null_progress().as_ref())?;
    serve(dataset, config).await
}

/// Starts the HTTP server over an already loaded table.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]` or `actix_web::rt::System`).
///
/// # Errors
///
/// Returns [`ServerError::Io`] if the server fails to bind or encounters
/// a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(dataset: Dataset, config: DashboardConfig) -> Result<(), ServerError> {
    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;

    log::info!(
        "Starting server on {bind_addr}:{port} with {} incidents",
        dataset.len()
    );

    let state = web::Data::new(AppState { dataset, config });

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
