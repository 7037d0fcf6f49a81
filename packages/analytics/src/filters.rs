//! Row filters.
//!
//! Each filter keeps the rows whose field is a member of an accepted set,
//! in their original order. An empty set keeps nothing. Values that do not
//! resolve to a known category (an unrecognized day or month) never match.

use std::collections::BTreeSet;

use crime_dashboard_analytics_models::IncidentFilter;
use crime_dashboard_dataset::IncidentTable;
use crime_dashboard_incident_models::{DayOfWeek, Month};

/// Keeps rows whose offense description is in `offenses`.
#[must_use]
pub fn filter_by_offenses<'a>(
    table: &IncidentTable<'a>,
    offenses: &BTreeSet<String>,
) -> IncidentTable<'a> {
    table.filtered(|row| offenses.contains(&row.offense_description))
}

/// Keeps rows whose day of the week is in `days`.
#[must_use]
pub fn filter_by_days<'a>(
    table: &IncidentTable<'a>,
    days: &BTreeSet<DayOfWeek>,
) -> IncidentTable<'a> {
    table.filtered(|row| row.day_of_week.is_some_and(|day| days.contains(&day)))
}

/// Keeps rows whose month is in `months`.
#[must_use]
pub fn filter_by_months<'a>(
    table: &IncidentTable<'a>,
    months: &BTreeSet<Month>,
) -> IncidentTable<'a> {
    table.filtered(|row| row.month.is_some_and(|month| months.contains(&month)))
}

/// Keeps rows whose street is in `streets`.
#[must_use]
pub fn filter_by_streets<'a>(
    table: &IncidentTable<'a>,
    streets: &BTreeSet<String>,
) -> IncidentTable<'a> {
    table.filtered(|row| streets.contains(&row.street))
}

/// Applies the map controls: offense, then day, then month.
#[must_use]
pub fn apply_filter<'a>(table: &IncidentTable<'a>, filter: &IncidentFilter) -> IncidentTable<'a> {
    let view = filter_by_offenses(table, &filter.offenses);
    let view = filter_by_days(&view, &filter.days);
    let view = filter_by_months(&view, &filter.months);
    log::debug!("Map filter kept {} of {} incidents", view.len(), table.len());
    view
}
