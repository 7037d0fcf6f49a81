#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filters and aggregators over the incident dataset.
//!
//! Every function here is pure: it takes a borrowed [`IncidentTable`]
//! view and returns either a new view (filters) or an owned summary
//! (aggregators). Nothing is cached and nothing mutates the dataset.
//!
//! [`IncidentTable`]: crime_dashboard_dataset::IncidentTable

pub mod catalog;
pub mod filters;
pub mod offenses;
pub mod streets;
pub mod temporal;

use std::collections::BTreeMap;

/// Counts keys, returning `(key, count)` pairs in order of first
/// appearance.
pub(crate) fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, u64)> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();

    for key in keys {
        if let Some(&i) = index.get(key) {
            counts[i].1 += 1;
        } else {
            index.insert(key, counts.len());
            counts.push((key, 1));
        }
    }

    counts
}
