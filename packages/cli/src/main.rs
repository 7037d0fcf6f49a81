#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime dashboard.
//!
//! ```text
//! crime_dashboard [--config dashboard.toml] [--data bostoncrime.csv] <command>
//! crime_dashboard ranking
//! crime_dashboard street-bar --streets "WASHINGTON ST, BOYLSTON ST"
//! crime_dashboard map --offense "LARCENY SHOPLIFTING" --day Friday --month 5
//! crime_dashboard dominant --street "WASHINGTON ST"
//! crime_dashboard serve
//! ```
//!
//! Every report is printed as pretty JSON. Running with no subcommand
//! enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`crime_dashboard_cli_utils::init_logger`])
//! so the CSV load progress bar and log lines share the terminal.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crime_dashboard_cli_utils::IndicatifProgress;
use crime_dashboard_config::DashboardConfig;
use crime_dashboard_dataset::Dataset;
use crime_dashboard_incident_models::DayOfWeek;

#[derive(Parser)]
#[command(
    name = "crime_dashboard",
    about = "Explore Boston crime incident reports"
)]
struct Cli {
    /// Config file (defaults to the built-in configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Incident CSV, overriding the configured path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Streets with the most and fewest incidents
    Ranking,
    /// Distinct street names
    Streets,
    /// Distinct offense descriptions
    Offenses,
    /// Incident counts for a comma-separated list of streets
    StreetBar {
        /// Street names, separated by commas
        #[arg(long)]
        streets: String,
    },
    /// Mapped incidents matching offense, day and month filters
    Map {
        /// Offense description to include (repeatable)
        #[arg(long = "offense")]
        offenses: Vec<String>,
        /// Day of the week to include (repeatable)
        #[arg(long = "day", value_parser = parse_day)]
        days: Vec<DayOfWeek>,
        /// Month number to include (repeatable)
        #[arg(long = "month", value_parser = clap::value_parser!(u8).range(1..=12))]
        months: Vec<u8>,
    },
    /// Incidents by time of day
    Hours,
    /// Incidents by day of the week
    Days,
    /// Incidents by month
    Months,
    /// Most common offenses and their share
    TopOffenses,
    /// Top offenses per month on each street
    StreetView {
        /// Street name (repeatable)
        #[arg(long = "street", required = true)]
        streets: Vec<String>,
    },
    /// Busiest day and month for a set of streets
    Dominant {
        /// Street name (repeatable)
        #[arg(long = "street", required = true)]
        streets: Vec<String>,
    },
    /// The full informative tab
    Informative,
    /// Start the HTTP API server
    Serve,
}

fn parse_day(raw: &str) -> Result<DayOfWeek, String> {
    raw.parse().map_err(|_| format!("unknown day of the week: {raw}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = crime_dashboard_cli_utils::init_logger();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.dataset.path = data;
    }
    log::debug!("Using config {config:?}");

    let progress = IndicatifProgress::bytes_bar(&multi, "Loading incidents");
    let dataset = Dataset::load(&config.dataset, progress.as_ref())?;

    match cli.command {
        Some(command) => commands::run(command, dataset, config),
        None => interactive::run(dataset, config),
    }
}
