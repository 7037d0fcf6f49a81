//! Time-of-day, day-of-week and month aggregators.

use std::collections::BTreeMap;

use crime_dashboard_analytics_models::{
    DayCount, HOUR_BUCKET_LABELS, HOUR_BUCKET_WIDTH, HourBucket, HourHistogram, MonthCount,
};
use crime_dashboard_dataset::IncidentTable;
use crime_dashboard_incident_models::DayOfWeek;

/// Counts incidents in six 4-hour buckets, `[0,4)` through `[20,24)`.
///
/// Hours of 24 or more fall in no bucket.
#[must_use]
pub fn hour_histogram(table: &IncidentTable<'_>) -> HourHistogram {
    let mut counts = [0u64; HOUR_BUCKET_LABELS.len()];
    for row in table.iter() {
        if let Some(count) = counts.get_mut(usize::from(row.hour / HOUR_BUCKET_WIDTH)) {
            *count += 1;
        }
    }

    let buckets = HOUR_BUCKET_LABELS
        .iter()
        .zip(counts)
        .zip(0u8..)
        .map(|((label, count), i)| HourBucket {
            start: i * HOUR_BUCKET_WIDTH,
            end: (i + 1) * HOUR_BUCKET_WIDTH,
            label: (*label).to_string(),
            count,
        })
        .collect();

    HourHistogram { buckets }
}

/// Counts incidents per day of the week.
///
/// Always returns seven entries in week order starting Sunday; days with
/// no incidents count zero.
#[must_use]
pub fn day_frequencies(table: &IncidentTable<'_>) -> Vec<DayCount> {
    let mut counts: BTreeMap<DayOfWeek, u64> = DayOfWeek::all().iter().map(|&d| (d, 0)).collect();
    for day in table.iter().filter_map(|row| row.day_of_week) {
        *counts.entry(day).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

/// Counts incidents per month, for months that appear in the data only,
/// in calendar order.
#[must_use]
pub fn month_frequencies(table: &IncidentTable<'_>) -> Vec<MonthCount> {
    let mut counts = BTreeMap::new();
    for month in table.iter().filter_map(|row| row.month) {
        *counts.entry(month).or_insert(0u64) += 1;
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}
