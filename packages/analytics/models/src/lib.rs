#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate result types for the dashboard analytics.
//!
//! These are the typed summaries the aggregators hand to the presenters.
//! They carry no rendering concerns (titles, axis labels); those are
//! attached by `crime_dashboard_presenter`.

use std::collections::BTreeSet;

use crime_dashboard_incident_models::{DayOfWeek, Month};
use serde::{Deserialize, Serialize};

/// Display labels for the six hour buckets, one per bucket in order.
pub const HOUR_BUCKET_LABELS: [&str; 6] = ["4 am", "8 am", "12 pm", "4 pm", "8 pm", "12 am"];

/// Width of each hour bucket.
pub const HOUR_BUCKET_WIDTH: u8 = 4;

/// The controls behind the incident map: which offenses, days and months
/// to show.
///
/// Each dimension is an allow-list. An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilter {
    /// Offense descriptions to include.
    pub offenses: BTreeSet<String>,
    /// Days of the week to include.
    pub days: BTreeSet<DayOfWeek>,
    /// Months to include.
    pub months: BTreeSet<Month>,
}

/// Incident count for one street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetCount {
    /// Street name.
    pub street: String,
    /// Number of incidents.
    pub count: u64,
}

/// Streets with the most and the fewest incidents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetRanking {
    /// Highest counts, descending.
    pub most: Vec<StreetCount>,
    /// Lowest counts, still in descending order (the tail of the ranking).
    pub least: Vec<StreetCount>,
}

/// One offense's share of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffenseSlice {
    /// Offense description.
    pub offense: String,
    /// Number of incidents.
    pub count: u64,
    /// Percentage of all incidents (0-100).
    pub percent: f64,
}

/// The most common offenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffenseShare {
    /// Total incidents the percentages are relative to.
    pub total: u64,
    /// Top offenses, most frequent first.
    pub slices: Vec<OffenseSlice>,
}

/// A half-open hour range `[start, end)` and its incident count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    /// First hour in the bucket (inclusive).
    pub start: u8,
    /// End hour (exclusive).
    pub end: u8,
    /// Display label.
    pub label: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incidents by time of day in six 4-hour buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourHistogram {
    /// Buckets in ascending hour order.
    pub buckets: Vec<HourBucket>,
}

impl HourHistogram {
    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Incident count for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    /// Day of the week.
    pub day: DayOfWeek,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    /// Month.
    pub month: Month,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one (offense, month) pair on a street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffenseMonthCount {
    /// Offense description.
    pub offense: String,
    /// Month derived from the occurrence timestamp.
    pub month: Month,
    /// Number of incidents.
    pub count: u64,
}

/// The most frequent offenses on a single street, split by month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetBreakdown {
    /// Street name.
    pub street: String,
    /// Top entries, most frequent first.
    pub entries: Vec<OffenseMonthCount>,
}

/// The busiest day and month for a set of streets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantPeriod {
    /// Day of the week with the most incidents.
    pub day: DayOfWeek,
    /// Month with the most incidents.
    pub month: Month,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_total_sums_buckets() {
        let histogram = HourHistogram {
            buckets: HOUR_BUCKET_LABELS
                .iter()
                .zip(0u8..)
                .map(|(label, i)| HourBucket {
                    start: i * HOUR_BUCKET_WIDTH,
                    end: (i + 1) * HOUR_BUCKET_WIDTH,
                    label: (*label).to_string(),
                    count: u64::from(i),
                })
                .collect(),
        };
        assert_eq!(histogram.total(), 15);
    }

    #[test]
    fn filter_deserializes_from_camel_case() {
        let filter: IncidentFilter = serde_json::from_str(
            r#"{"offenses":["THEFT"],"days":["Monday","Friday"],"months":["May"]}"#,
        )
        .unwrap();

        assert!(filter.offenses.contains("THEFT"));
        assert_eq!(filter.days.len(), 2);
        assert!(filter.months.contains(&Month::May));
    }
}
