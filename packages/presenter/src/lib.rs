#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart-ready series and map views.
//!
//! This is the boundary to the rendering collaborator. Aggregates from
//! `crime_dashboard_analytics` are turned into labeled series (bar charts,
//! histogram, pies), ranking tables, and a point list for the incident
//! map. The types serialize to camelCase JSON and carry everything a
//! renderer needs: titles, axis labels, and per-slice label text.

pub mod panels;

use crime_dashboard_analytics::offenses::{implied_count, percent_of};
use crime_dashboard_analytics_models::{
    DayCount, DominantPeriod, HourHistogram, MonthCount, OffenseShare, StreetBreakdown,
    StreetCount, StreetRanking,
};
use crime_dashboard_dataset::IncidentTable;
use serde::{Deserialize, Serialize};

/// A bar chart or histogram: one value per category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// Category labels, in display order.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<u64>,
}

/// A pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSeries {
    /// Chart title.
    pub title: String,
    /// Slice names.
    pub labels: Vec<String>,
    /// Slice sizes.
    pub values: Vec<u64>,
    /// Text drawn on each slice.
    pub slice_labels: Vec<String>,
}

/// A titled street/count table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetTable {
    /// Table caption.
    pub title: String,
    /// Rows in display order.
    pub rows: Vec<StreetCount>,
}

/// One incident on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Offense description, shown in the tooltip.
    pub offense: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Everything the map renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Mapped incidents.
    pub points: Vec<MapPoint>,
    /// Mean position of the points; `None` when there are no points.
    pub center: Option<Coordinate>,
    /// Initial zoom level.
    pub zoom: f64,
}

/// Sentence describing the busiest day and month for the selected
/// streets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Summary {
    /// The streets have incidents.
    Found {
        /// Display text.
        message: String,
    },
    /// No incidents on the selected streets.
    NoData {
        /// Display text.
        message: String,
    },
}

impl Summary {
    /// The display text, regardless of outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Found { message } | Self::NoData { message } => message,
        }
    }
}

/// Bar chart of incident counts on user-selected streets.
#[must_use]
pub fn street_bar_series(counts: &[StreetCount]) -> CategorySeries {
    CategorySeries {
        title: "Crimes committed on specified streets".to_string(),
        x_label: "Street".to_string(),
        y_label: "Frequency of crimes".to_string(),
        labels: counts.iter().map(|c| c.street.clone()).collect(),
        values: counts.iter().map(|c| c.count).collect(),
    }
}

/// Histogram of incidents by time of day.
#[must_use]
pub fn hour_histogram_series(histogram: &HourHistogram) -> CategorySeries {
    CategorySeries {
        title: "Common Crime Times".to_string(),
        x_label: "Hour".to_string(),
        y_label: "Frequency".to_string(),
        labels: histogram.buckets.iter().map(|b| b.label.clone()).collect(),
        values: histogram.buckets.iter().map(|b| b.count).collect(),
    }
}

/// Bar chart of incidents by day of the week, labeled `Sun`..`Sat`.
#[must_use]
pub fn day_series(days: &[DayCount]) -> CategorySeries {
    CategorySeries {
        title: "Frequency of Crime on Given Day".to_string(),
        x_label: "Day of Week".to_string(),
        y_label: "Frequency".to_string(),
        labels: days
            .iter()
            .map(|d| d.day.abbreviation().to_string())
            .collect(),
        values: days.iter().map(|d| d.count).collect(),
    }
}

/// Bar chart of incidents by month, labeled with month numbers.
#[must_use]
pub fn month_series(months: &[MonthCount]) -> CategorySeries {
    CategorySeries {
        title: "Frequency of Crime in Given Month".to_string(),
        x_label: "Month".to_string(),
        y_label: "Frequency".to_string(),
        labels: months.iter().map(|m| m.month.number().to_string()).collect(),
        values: months.iter().map(|m| m.count).collect(),
    }
}

/// Pie of the most common offenses.
///
/// Each slice is labeled with its share of all incidents and the count
/// that share stands for, e.g. `"12.5%\n(125)"`.
#[must_use]
pub fn top_offense_pie(share: &OffenseShare) -> PieSeries {
    PieSeries {
        title: format!("Top {} Crime Types by Frequency", share.slices.len()),
        labels: share.slices.iter().map(|s| s.offense.clone()).collect(),
        values: share.slices.iter().map(|s| s.count).collect(),
        slice_labels: share
            .slices
            .iter()
            .map(|s| format!("{:.1}%\n({})", s.percent, implied_count(share.total, s.percent)))
            .collect(),
    }
}

/// Pie of the top (offense, month) groups on one street.
///
/// Slice labels are each group's share of the pie.
#[must_use]
pub fn street_breakdown_pie(breakdown: &StreetBreakdown) -> PieSeries {
    let total: u64 = breakdown.entries.iter().map(|e| e.count).sum();

    PieSeries {
        title: format!(
            "Top {} Crimes on {}",
            breakdown.entries.len(),
            breakdown.street
        ),
        labels: breakdown
            .entries
            .iter()
            .map(|e| format!("{} ({})", e.offense, e.month))
            .collect(),
        values: breakdown.entries.iter().map(|e| e.count).collect(),
        slice_labels: breakdown
            .entries
            .iter()
            .map(|e| format!("{:.2}%", percent_of(e.count, total)))
            .collect(),
    }
}

/// The most/least ranking as two captioned tables.
#[must_use]
pub fn ranking_tables(ranking: &StreetRanking) -> (StreetTable, StreetTable) {
    (
        StreetTable {
            title: "Streets with the most offenses".to_string(),
            rows: ranking.most.clone(),
        },
        StreetTable {
            title: "Streets with the fewest offenses".to_string(),
            rows: ranking.least.clone(),
        },
    )
}

/// Map points for every incident with usable coordinates, centered on
/// their mean position.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn map_view(table: &IncidentTable<'_>, zoom: f64) -> MapView {
    let points: Vec<MapPoint> = table
        .iter()
        .filter_map(|row| {
            row.coordinates().map(|(latitude, longitude)| MapPoint {
                offense: row.offense_description.clone(),
                latitude,
                longitude,
            })
        })
        .collect();

    let unmapped = table.len() - points.len();
    if unmapped > 0 {
        log::debug!("{unmapped} incidents have no coordinates and are left off the map");
    }

    let center = (!points.is_empty()).then(|| {
        let n = points.len() as f64;
        Coordinate {
            latitude: points.iter().map(|p| p.latitude).sum::<f64>() / n,
            longitude: points.iter().map(|p| p.longitude).sum::<f64>() / n,
        }
    });

    MapView {
        points,
        center,
        zoom,
    }
}

/// Describes the busiest day and month for `streets`, or reports that
/// there is no data.
#[must_use]
pub fn dominant_summary(streets: &[String], period: Option<&DominantPeriod>) -> Summary {
    match period {
        Some(period) => Summary::Found {
            message: format!(
                "The day of the week with the most crime on {} is {}, and the month with the most is {}.",
                streets.join(", "),
                period.day,
                period.month
            ),
        },
        None => Summary::NoData {
            message: "No data available for the selected street.".to_string(),
        },
    }
}
