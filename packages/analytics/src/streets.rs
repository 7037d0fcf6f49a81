//! Street-level aggregators.

use std::collections::{BTreeMap, BTreeSet};

use crime_dashboard_analytics_models::{
    DominantPeriod, OffenseMonthCount, StreetBreakdown, StreetCount, StreetRanking,
};
use crime_dashboard_dataset::IncidentTable;
use crime_dashboard_incident_models::Month;

use crate::count_in_order;
use crate::filters::filter_by_streets;

/// Ranks single streets by incident count.
///
/// Intersections (street values containing `&`) and rows without a street
/// are left out. Streets are sorted by count, descending; ties keep the
/// order in which the streets first appear. `most` is the head of that
/// ranking and `least` its tail, each at most `limit` long.
#[must_use]
pub fn rank_streets(table: &IncidentTable<'_>, limit: usize) -> StreetRanking {
    let mut counts = count_in_order(
        table
            .iter()
            .filter(|row| !row.street.is_empty() && !row.is_intersection())
            .map(|row| row.street.as_str()),
    );
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    log::debug!("Ranked {} streets", counts.len());

    let head = limit.min(counts.len());
    let tail = counts.len().saturating_sub(limit);

    StreetRanking {
        most: to_street_counts(&counts[..head]),
        least: to_street_counts(&counts[tail..]),
    }
}

fn to_street_counts(counts: &[(&str, u64)]) -> Vec<StreetCount> {
    counts
        .iter()
        .map(|&(street, count)| StreetCount {
            street: street.to_string(),
            count,
        })
        .collect()
}

/// Splits free-text street input into normalized street names.
///
/// Entries are separated by commas, trimmed, upper-cased to match the
/// dataset, and deduplicated keeping the first appearance. Blank entries
/// are dropped.
#[must_use]
pub fn parse_street_list(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    text.split(',')
        .map(|entry| entry.trim().to_uppercase())
        .filter(|entry| !entry.is_empty() && seen.insert(entry.clone()))
        .collect()
}

/// Counts incidents on each street named in `text`.
///
/// `table` should be the full dataset view. Results follow the order of
/// the input; streets with no incidents are omitted.
#[must_use]
pub fn street_frequencies(table: &IncidentTable<'_>, text: &str) -> Vec<StreetCount> {
    let requested = parse_street_list(text);

    let mut counts: BTreeMap<&str, u64> = requested.iter().map(|s| (s.as_str(), 0)).collect();
    for row in table.iter() {
        if let Some(count) = counts.get_mut(row.street.as_str()) {
            *count += 1;
        }
    }

    requested
        .iter()
        .filter_map(|street| {
            let count = counts.get(street.as_str()).copied().unwrap_or(0);
            (count > 0).then(|| StreetCount {
                street: street.clone(),
                count,
            })
        })
        .collect()
}

/// Top offenses on each street, split by the month they occurred in.
///
/// The month is taken from the occurrence timestamp, not the precomputed
/// month column; rows without a parseable timestamp are skipped. Each
/// street keeps its `limit` largest (offense, month) groups, most frequent
/// first, ties ordered by offense and then month. Results follow the
/// order of `streets`.
#[must_use]
pub fn street_breakdown(
    table: &IncidentTable<'_>,
    streets: &[String],
    limit: usize,
) -> Vec<StreetBreakdown> {
    streets
        .iter()
        .map(|street| {
            let mut groups: BTreeMap<(&str, Month), u64> = BTreeMap::new();
            for row in table.iter().filter(|row| row.street == *street) {
                let Some(month) = row.occurred_month() else {
                    continue;
                };
                *groups
                    .entry((row.offense_description.as_str(), month))
                    .or_insert(0) += 1;
            }

            let mut entries: Vec<OffenseMonthCount> = groups
                .into_iter()
                .map(|((offense, month), count)| OffenseMonthCount {
                    offense: offense.to_string(),
                    month,
                    count,
                })
                .collect();
            entries.sort_by(|a, b| b.count.cmp(&a.count));
            entries.truncate(limit);

            StreetBreakdown {
                street: street.clone(),
                entries,
            }
        })
        .collect()
}

/// Busiest day of the week and month across the given streets.
///
/// Returns `None` when no incidents fall on those streets, or when the
/// matching incidents carry no recognizable day or month. Ties go to the
/// earliest month in the calendar and the earliest day in the week
/// (Sunday first).
#[must_use]
pub fn dominant_period(
    table: &IncidentTable<'_>,
    streets: &BTreeSet<String>,
) -> Option<DominantPeriod> {
    let subset = filter_by_streets(table, streets);
    if subset.is_empty() {
        log::debug!("No incidents on {} selected streets", streets.len());
        return None;
    }

    let mut days = BTreeMap::new();
    let mut months = BTreeMap::new();
    for row in subset.iter() {
        if let Some(day) = row.day_of_week {
            *days.entry(day).or_insert(0u64) += 1;
        }
        if let Some(month) = row.month {
            *months.entry(month).or_insert(0u64) += 1;
        }
    }

    Some(DominantPeriod {
        day: first_max(&days)?,
        month: first_max(&months)?,
    })
}

/// Key with the highest count; the smallest key wins a tie.
fn first_max<K: Copy + Ord>(counts: &BTreeMap<K, u64>) -> Option<K> {
    counts
        .iter()
        .fold(None, |best: Option<(K, u64)>, (&key, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dataset, incident, on_street};
    use chrono::NaiveDate;
    use crime_dashboard_incident_models::{DayOfWeek, Incident};

    fn pairs(counts: &[StreetCount]) -> Vec<(&str, u64)> {
        counts.iter().map(|c| (c.street.as_str(), c.count)).collect()
    }

    fn on_date(id: &str, street: &str, offense: &str, month: u32) -> Incident {
        Incident {
            occurred_on: NaiveDate::from_ymd_opt(2023, month, 10)
                .and_then(|d| d.and_hms_opt(8, 0, 0)),
            ..incident(id, street, offense)
        }
    }

    #[test]
    fn ranking_uses_stable_tie_order() {
        let mut rows = Vec::new();
        rows.extend(on_street("a", "A", 10));
        rows.extend(on_street("b", "B", 7));
        rows.extend(on_street("c", "C", 7));
        rows.extend(on_street("d", "D", 1));
        rows.extend(on_street("e", "E", 1));
        rows.extend(on_street("f", "F", 1));
        let data = dataset(rows);

        let ranking = rank_streets(&data.table(), 5);

        assert_eq!(
            pairs(&ranking.most),
            vec![("A", 10), ("B", 7), ("C", 7), ("D", 1), ("E", 1)]
        );
        assert_eq!(
            pairs(&ranking.least),
            vec![("B", 7), ("C", 7), ("D", 1), ("E", 1), ("F", 1)]
        );
    }

    #[test]
    fn ranking_excludes_intersections_and_blank_streets() {
        let mut rows = on_street("a", "MAIN ST & 2ND ST", 4);
        rows.extend(on_street("b", "WASHINGTON ST", 2));
        rows.extend(on_street("c", "", 3));
        let data = dataset(rows);

        let ranking = rank_streets(&data.table(), 5);

        assert_eq!(pairs(&ranking.most), vec![("WASHINGTON ST", 2)]);
        assert_eq!(pairs(&ranking.least), vec![("WASHINGTON ST", 2)]);
    }

    #[test]
    fn ranking_ties_follow_first_appearance_not_name() {
        let data = dataset(vec![
            incident("1", "ZETA ST", "THEFT"),
            incident("2", "ALPHA ST", "THEFT"),
        ]);
        let ranking = rank_streets(&data.table(), 5);
        assert_eq!(pairs(&ranking.most), vec![("ZETA ST", 1), ("ALPHA ST", 1)]);
    }

    #[test]
    fn parse_street_list_normalizes() {
        assert_eq!(
            parse_street_list("washington st, Boylston St,,  WASHINGTON ST ,albany st"),
            vec!["WASHINGTON ST", "BOYLSTON ST", "ALBANY ST"]
        );
        assert!(parse_street_list("").is_empty());
        assert!(parse_street_list(" , ").is_empty());
    }

    #[test]
    fn street_frequencies_follow_input_and_skip_unmatched() {
        let mut rows = on_street("a", "WASHINGTON ST", 3);
        rows.extend(on_street("b", "BOYLSTON ST", 1));
        let data = dataset(rows);

        let counts = street_frequencies(&data.table(), "boylston st, nowhere rd, washington st");

        assert_eq!(pairs(&counts), vec![("BOYLSTON ST", 1), ("WASHINGTON ST", 3)]);
    }

    #[test]
    fn breakdown_groups_by_offense_and_timestamp_month() {
        let data = dataset(vec![
            on_date("1", "A ST", "THEFT", 3),
            on_date("2", "A ST", "THEFT", 3),
            on_date("3", "A ST", "THEFT", 4),
            Incident {
                month: Some(Month::December),
                ..on_date("4", "A ST", "ASSAULT", 1)
            },
            on_date("5", "B ST", "ARSON", 1),
            Incident {
                occurred_on: None,
                ..incident("6", "A ST", "THEFT")
            },
        ]);

        let breakdown = street_breakdown(&data.table(), &["A ST".to_string()], 10);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].street, "A ST");
        let entries: Vec<(&str, Month, u64)> = breakdown[0]
            .entries
            .iter()
            .map(|e| (e.offense.as_str(), e.month, e.count))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("THEFT", Month::March, 2),
                ("ASSAULT", Month::January, 1),
                ("THEFT", Month::April, 1),
            ]
        );
    }

    #[test]
    fn breakdown_truncates_and_handles_unknown_street() {
        let rows = (1..=12)
            .map(|m| on_date(&m.to_string(), "A ST", "THEFT", m))
            .collect();
        let data = dataset(rows);

        let breakdown = street_breakdown(
            &data.table(),
            &["A ST".to_string(), "NOWHERE".to_string()],
            10,
        );

        assert_eq!(breakdown[0].entries.len(), 10);
        assert_eq!(breakdown[0].entries[0].month, Month::January);
        assert!(breakdown[1].entries.is_empty());
    }

    #[test]
    fn dominant_period_empty_subset_is_none() {
        let data = dataset(on_street("a", "A ST", 2));
        let streets: BTreeSet<String> = ["NOWHERE".to_string()].into_iter().collect();

        assert_eq!(dominant_period(&data.table(), &streets), None);
        assert_eq!(dominant_period(&data.table(), &BTreeSet::new()), None);
    }

    #[test]
    fn dominant_period_picks_highest_counts() {
        let data = dataset(vec![
            Incident {
                day_of_week: Some(DayOfWeek::Friday),
                month: Some(Month::August),
                ..incident("1", "A ST", "THEFT")
            },
            Incident {
                day_of_week: Some(DayOfWeek::Friday),
                month: Some(Month::August),
                ..incident("2", "B ST", "THEFT")
            },
            Incident {
                day_of_week: Some(DayOfWeek::Monday),
                month: Some(Month::March),
                ..incident("3", "A ST", "THEFT")
            },
            Incident {
                day_of_week: Some(DayOfWeek::Monday),
                month: Some(Month::March),
                ..incident("4", "C ST", "THEFT")
            },
        ]);
        let streets: BTreeSet<String> = ["A ST".to_string(), "B ST".to_string()]
            .into_iter()
            .collect();

        assert_eq!(
            dominant_period(&data.table(), &streets),
            Some(DominantPeriod {
                day: DayOfWeek::Friday,
                month: Month::August,
            })
        );
    }

    #[test]
    fn dominant_period_ties_go_to_earliest() {
        let data = dataset(vec![
            Incident {
                day_of_week: Some(DayOfWeek::Saturday),
                month: Some(Month::October),
                ..incident("1", "A ST", "THEFT")
            },
            Incident {
                day_of_week: Some(DayOfWeek::Tuesday),
                month: Some(Month::February),
                ..incident("2", "A ST", "THEFT")
            },
        ]);
        let streets: BTreeSet<String> = ["A ST".to_string()].into_iter().collect();

        assert_eq!(
            dominant_period(&data.table(), &streets),
            Some(DominantPeriod {
                day: DayOfWeek::Tuesday,
                month: Month::February,
            })
        );
    }

    #[test]
    fn dominant_period_without_recognized_values_is_none() {
        let data = dataset(vec![Incident {
            day_of_week: None,
            month: None,
            ..incident("1", "A ST", "THEFT")
        }]);
        let streets: BTreeSet<String> = ["A ST".to_string()].into_iter().collect();

        assert_eq!(dominant_period(&data.table(), &streets), None);
    }
}
