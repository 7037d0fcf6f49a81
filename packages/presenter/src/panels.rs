//! The dashboard's two data tabs, assembled from the analytics.

use std::collections::BTreeSet;

use crime_dashboard_analytics::{
    filters::apply_filter,
    offenses::top_offenses,
    streets::{dominant_period, rank_streets, street_breakdown, street_frequencies},
    temporal::{day_frequencies, hour_histogram, month_frequencies},
};
use crime_dashboard_analytics_models::IncidentFilter;
use crime_dashboard_config::DashboardConfig;
use crime_dashboard_dataset::Dataset;
use crime_dashboard_incident_models::{DayOfWeek, Month};
use serde::{Deserialize, Serialize};

use crate::{
    CategorySeries, MapView, PieSeries, StreetTable, Summary, day_series, dominant_summary,
    hour_histogram_series, map_view, month_series, ranking_tables, street_bar_series,
    street_breakdown_pie, top_offense_pie,
};

/// The user's control values on the interactive tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveSelection {
    /// Comma-separated street names for the frequency bar chart.
    pub street_text: String,
    /// Offenses shown on the map.
    pub offenses: BTreeSet<String>,
    /// Days shown on the map.
    pub days: BTreeSet<DayOfWeek>,
    /// Month shown on the map.
    pub month: Month,
    /// Streets for the summary and per-street pies.
    pub streets: Vec<String>,
}

/// Interactive tab output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractivePanel {
    /// Counts for the typed street list.
    pub street_bar: CategorySeries,
    /// Filtered incident map.
    pub map: MapView,
    /// One pie per selected street; empty when there is no data.
    pub street_pies: Vec<PieSeries>,
    /// Busiest day and month for the selected streets.
    pub summary: Summary,
}

/// Informative tab output. Independent of user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformativePanel {
    /// Time-of-day histogram.
    pub histogram: CategorySeries,
    /// Streets with the most incidents.
    pub most_streets: StreetTable,
    /// Streets with the fewest incidents.
    pub least_streets: StreetTable,
    /// Incidents by day of the week.
    pub days: CategorySeries,
    /// Incidents by month.
    pub months: CategorySeries,
    /// Most common offenses.
    pub top_offenses: PieSeries,
}

impl InteractiveSelection {
    /// The map filter these controls describe.
    #[must_use]
    pub fn map_filter(&self) -> IncidentFilter {
        IncidentFilter {
            offenses: self.offenses.clone(),
            days: self.days.clone(),
            months: BTreeSet::from([self.month]),
        }
    }
}

/// Builds the interactive tab for `selection`.
#[must_use]
pub fn interactive_panel(
    dataset: &Dataset,
    selection: &InteractiveSelection,
    config: &DashboardConfig,
) -> InteractivePanel {
    let table = dataset.table();

    let street_bar = street_bar_series(&street_frequencies(&table, &selection.street_text));
    let map = map_view(&apply_filter(&table, &selection.map_filter()), config.map.zoom);
    let (summary, street_pies) = street_analysis(dataset, &selection.streets, config);

    InteractivePanel {
        street_bar,
        map,
        street_pies,
        summary,
    }
}

/// Summary and per-street pies for `streets`.
///
/// The pies are only built when the streets have incidents.
#[must_use]
pub fn street_analysis(
    dataset: &Dataset,
    streets: &[String],
    config: &DashboardConfig,
) -> (Summary, Vec<PieSeries>) {
    let table = dataset.table();
    let selected: BTreeSet<String> = streets.iter().cloned().collect();
    let period = dominant_period(&table, &selected);
    let summary = dominant_summary(streets, period.as_ref());

    let pies = if period.is_some() {
        street_breakdown(&table, streets, config.limits.street_view)
            .iter()
            .map(street_breakdown_pie)
            .collect()
    } else {
        Vec::new()
    };

    (summary, pies)
}

/// Builds the informative tab.
#[must_use]
pub fn informative_panel(dataset: &Dataset, config: &DashboardConfig) -> InformativePanel {
    let table = dataset.table();
    let (most_streets, least_streets) =
        ranking_tables(&rank_streets(&table, config.limits.street_ranking));

    InformativePanel {
        histogram: hour_histogram_series(&hour_histogram(&table)),
        most_streets,
        least_streets,
        days: day_series(&day_frequencies(&table)),
        months: month_series(&month_frequencies(&table)),
        top_offenses: top_offense_pie(&top_offenses(&table, config.limits.top_offenses)),
    }
}
