//! HTTP handler functions for the crime dashboard API.

use actix_web::{HttpResponse, web};
use crime_dashboard_analytics::{
    catalog::{distinct_offenses, distinct_streets},
    filters::apply_filter,
    streets::street_frequencies,
};
use crime_dashboard_analytics_models::IncidentFilter;
use crime_dashboard_incident_models::{DayOfWeek, InvalidMonthError};
use crime_dashboard_presenter::{
    map_view,
    panels::{
        InteractiveSelection, informative_panel, interactive_panel,
        street_analysis as analyze_streets,
    },
    street_bar_series,
};
use crime_dashboard_server_models::{
    ApiHealth, InteractiveRequest, MapRequest, StreetAnalysisRequest, StreetAnalysisResponse,
    StreetFrequencyRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        incident_count: state.dataset.len(),
    })
}

/// `GET /api/offenses`
///
/// Distinct offense descriptions, in order of first appearance.
pub async fn offenses(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(distinct_offenses(&state.dataset.table()))
}

/// `GET /api/streets`
///
/// Distinct street names, in order of first appearance.
pub async fn streets(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(distinct_streets(&state.dataset.table()))
}

/// `GET /api/days`
pub async fn days() -> HttpResponse {
    HttpResponse::Ok().json(DayOfWeek::all())
}

/// `GET /api/informative`
pub async fn informative(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(informative_panel(&state.dataset, &state.config))
}

/// `POST /api/interactive`
pub async fn interactive(
    state: web::Data<AppState>,
    body: web::Json<InteractiveRequest>,
) -> HttpResponse {
    match InteractiveSelection::try_from(body.into_inner()) {
        Ok(selection) => {
            HttpResponse::Ok().json(interactive_panel(&state.dataset, &selection, &state.config))
        }
        Err(e) => bad_month(&e),
    }
}

/// `POST /api/map`
///
/// Incidents matching the offense, day and month filters, as map points.
pub async fn map(state: web::Data<AppState>, body: web::Json<MapRequest>) -> HttpResponse {
    match IncidentFilter::try_from(body.into_inner()) {
        Ok(filter) => {
            let table = state.dataset.table();
            HttpResponse::Ok().json(map_view(&apply_filter(&table, &filter), state.config.map.zoom))
        }
        Err(e) => bad_month(&e),
    }
}

/// `POST /api/street-frequency`
pub async fn street_frequency(
    state: web::Data<AppState>,
    body: web::Json<StreetFrequencyRequest>,
) -> HttpResponse {
    let counts = street_frequencies(&state.dataset.table(), &body.streets);
    HttpResponse::Ok().json(street_bar_series(&counts))
}

/// `POST /api/street-analysis`
///
/// Busiest day and month plus per-street offense pies.
pub async fn street_analysis(
    state: web::Data<AppState>,
    body: web::Json<StreetAnalysisRequest>,
) -> HttpResponse {
    let (summary, pies) = analyze_streets(&state.dataset, &body.streets, &state.config);
    HttpResponse::Ok().json(StreetAnalysisResponse { summary, pies })
}

fn bad_month(e: &InvalidMonthError) -> HttpResponse {
    log::warn!("Rejected request: {e}");
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": e.to_string()
    }))
}
