#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime dashboard server.
//!
//! Months arrive as plain numbers from the month slider, so request types
//! that carry months are converted into their domain counterparts with
//! `TryFrom`, which rejects anything outside 1-12.

use std::collections::BTreeSet;

use crime_dashboard_analytics_models::IncidentFilter;
use crime_dashboard_incident_models::{DayOfWeek, InvalidMonthError, Month};
use crime_dashboard_presenter::{PieSeries, Summary, panels::InteractiveSelection};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of incidents loaded.
    pub incident_count: usize,
}

/// Body of `POST /api/map`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapRequest {
    /// Offense descriptions to include.
    pub offenses: BTreeSet<String>,
    /// Days of the week to include.
    pub days: BTreeSet<DayOfWeek>,
    /// Month numbers to include.
    pub months: Vec<u8>,
}

impl TryFrom<MapRequest> for IncidentFilter {
    type Error = InvalidMonthError;

    fn try_from(request: MapRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            offenses: request.offenses,
            days: request.days,
            months: request
                .months
                .into_iter()
                .map(Month::from_number)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Body of `POST /api/street-frequency`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetFrequencyRequest {
    /// Comma-separated street names.
    pub streets: String,
}

/// Body of `POST /api/street-analysis`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetAnalysisRequest {
    /// Streets to analyze.
    pub streets: Vec<String>,
}

/// Response of `POST /api/street-analysis`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetAnalysisResponse {
    /// Busiest day and month for the streets.
    pub summary: Summary,
    /// One pie per street; empty when there is no data.
    pub pies: Vec<PieSeries>,
}

/// Body of `POST /api/interactive`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveRequest {
    /// Comma-separated street names for the frequency chart.
    #[serde(default)]
    pub street_text: String,
    /// Offenses shown on the map.
    #[serde(default)]
    pub offenses: BTreeSet<String>,
    /// Days shown on the map.
    #[serde(default)]
    pub days: BTreeSet<DayOfWeek>,
    /// Month number shown on the map.
    pub month: u8,
    /// Streets for the summary and per-street pies.
    #[serde(default)]
    pub streets: Vec<String>,
}

impl TryFrom<InteractiveRequest> for InteractiveSelection {
    type Error = InvalidMonthError;

    fn try_from(request: InteractiveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            street_text: request.street_text,
            offenses: request.offenses,
            days: request.days,
            month: Month::from_number(request.month)?,
            streets: request.streets,
        })
    }
}
