//! Offense frequency aggregators.

use crime_dashboard_analytics_models::{OffenseShare, OffenseSlice};
use crime_dashboard_dataset::IncidentTable;

use crate::count_in_order;

/// The `limit` most common offenses and their share of all incidents.
///
/// Offenses are ordered by count, descending; equal counts are ordered by
/// name, descending.
#[must_use]
pub fn top_offenses(table: &IncidentTable<'_>, limit: usize) -> OffenseShare {
    let mut counts = count_in_order(table.iter().map(|row| row.offense_description.as_str()));
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0)));
    counts.truncate(limit);

    let total = table.len() as u64;
    let slices = counts
        .into_iter()
        .map(|(offense, count)| OffenseSlice {
            offense: offense.to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect();

    OffenseShare { total, slices }
}

/// `count` as a percentage of `total`. Zero when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

/// The absolute count a percentage of `total` stands for, rounded to the
/// nearest whole incident.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn implied_count(total: u64, percent: f64) -> u64 {
    (total as f64 * percent / 100.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dataset, incident};
    use crime_dashboard_incident_models::Incident;

    fn rows(counts: &[(&str, usize)]) -> Vec<Incident> {
        let mut rows = Vec::new();
        for (offense, n) in counts {
            for i in 0..*n {
                rows.push(incident(&format!("{offense}-{i}"), "A ST", offense));
            }
        }
        rows
    }

    #[test]
    fn sorts_by_count_then_name_descending() {
        let data = dataset(rows(&[("ASSAULT", 2), ("THEFT", 5), ("ARSON", 2), ("FRAUD", 1)]));

        let share = top_offenses(&data.table(), 3);

        let names: Vec<(&str, u64)> = share
            .slices
            .iter()
            .map(|s| (s.offense.as_str(), s.count))
            .collect();
        assert_eq!(names, vec![("THEFT", 5), ("ASSAULT", 2), ("ARSON", 2)]);
        assert_eq!(share.total, 10);
        assert!((share.slices[0].percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn takes_at_most_limit() {
        let names: Vec<(String, usize)> = (0..15).map(|i| (format!("OFFENSE {i:02}"), 1)).collect();
        let counts: Vec<(&str, usize)> = names.iter().map(|(s, n)| (s.as_str(), *n)).collect();
        let data = dataset(rows(&counts));

        let share = top_offenses(&data.table(), 10);

        assert_eq!(share.slices.len(), 10);
        assert_eq!(share.slices[0].offense, "OFFENSE 14");
    }

    #[test]
    fn empty_table_has_no_slices() {
        let data = dataset(Vec::new());
        let share = top_offenses(&data.table(), 10);
        assert_eq!(share.total, 0);
        assert!(share.slices.is_empty());
    }

    #[test]
    fn implied_count_rounds() {
        assert_eq!(implied_count(1000, 12.5), 125);
        assert_eq!(implied_count(3, 33.333), 1);
        assert_eq!(implied_count(7, 50.0), 4);
        assert_eq!(implied_count(0, 80.0), 0);
    }

    #[test]
    fn implied_count_recovers_slice_count() {
        let data = dataset(rows(&[("THEFT", 7), ("ASSAULT", 4), ("ARSON", 2)]));
        let share = top_offenses(&data.table(), 10);
        for slice in &share.slices {
            assert_eq!(implied_count(share.total, slice.percent), slice.count);
        }
    }
}
