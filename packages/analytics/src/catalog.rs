//! Distinct values for populating selection controls.

use std::collections::BTreeSet;

use crime_dashboard_dataset::IncidentTable;

/// Distinct non-empty street names, in order of first appearance.
#[must_use]
pub fn distinct_streets(table: &IncidentTable<'_>) -> Vec<String> {
    distinct(
        table
            .iter()
            .map(|row| row.street.as_str())
            .filter(|street| !street.is_empty()),
    )
}

/// Distinct offense descriptions, in order of first appearance.
///
/// A blank description is kept as its own value.
#[must_use]
pub fn distinct_offenses(table: &IncidentTable<'_>) -> Vec<String> {
    distinct(table.iter().map(|row| row.offense_description.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
