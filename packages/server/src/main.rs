#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone server binary.
//!
//! Reads the config file named by `CRIME_DASHBOARD_CONFIG` (or the
//! embedded defaults), loads the incident table, and serves the API.

use std::path::PathBuf;

use crime_dashboard_config::DashboardConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var("CRIME_DASHBOARD_CONFIG").ok().map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref())?;

    crime_dashboard_server::run_server(config).await?;
    Ok(())
}
