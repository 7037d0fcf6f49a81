#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident dataset loading.
//!
//! Reads the incident CSV once, validates its header against the required
//! schema, converts every row into a typed [`Incident`], and hands back an
//! immutable [`Dataset`] that is cheap to clone and share across threads.
//! All filtering and aggregation happens on borrowed [`IncidentTable`]
//! views of that dataset.

pub mod progress;
pub mod table;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crime_dashboard_config::{DatasetConfig, DuplicatePolicy};
use crime_dashboard_incident_models::{DayOfWeek, Incident, Month};
use serde::Deserialize;
use thiserror::Error;

pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use table::IncidentTable;

/// Columns that must be present in the CSV header.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "INCIDENT_NUMBER",
    "OFFENSE_DESCRIPTION",
    "STREET",
    "DAY_OF_WEEK",
    "MONTH",
    "HOUR",
    "OCCURRED_ON_DATE",
    "Lat",
    "Long",
];

/// Rows between progress position updates.
const PROGRESS_INTERVAL: usize = 1_000;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The CSV file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        /// Path of the file that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The CSV could not be parsed or a row did not match the schema.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns are missing from the header.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Every required column that was not found.
        columns: Vec<String>,
    },

    /// An incident number appeared more than once.
    #[error("Duplicate incident number: {incident_number}")]
    DuplicateIncident {
        /// The repeated incident number.
        incident_number: String,
    },
}

/// A CSV row before category values are resolved.
#[derive(Debug, Deserialize)]
struct RawIncident {
    #[serde(rename = "INCIDENT_NUMBER")]
    incident_number: String,
    #[serde(rename = "OFFENSE_DESCRIPTION")]
    offense_description: String,
    #[serde(rename = "STREET")]
    street: String,
    #[serde(rename = "DAY_OF_WEEK")]
    day_of_week: String,
    #[serde(rename = "MONTH")]
    month: String,
    #[serde(rename = "HOUR")]
    hour: u8,
    #[serde(rename = "OCCURRED_ON_DATE")]
    occurred_on_date: String,
    #[serde(rename = "Lat", deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(rename = "Long", deserialize_with = "csv::invalid_option")]
    long: Option<f64>,
}

impl From<RawIncident> for Incident {
    fn from(raw: RawIncident) -> Self {
        Self {
            incident_number: raw.incident_number,
            offense_description: raw.offense_description,
            street: raw.street,
            day_of_week: DayOfWeek::from_abbreviation(&raw.day_of_week),
            month: raw
                .month
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|m| Month::from_number(m).ok()),
            hour: raw.hour,
            occurred_on: parse_occurred_on(&raw.occurred_on_date),
            latitude: raw.lat,
            longitude: raw.long,
        }
    }
}

/// Parses an occurrence timestamp.
///
/// Accepts `2023-01-01 00:00:00+00` (the export format), the same without
/// an offset, ISO 8601 with a `T` separator, and a bare date. Offsets are
/// dropped; the local wall-clock time is kept.
#[must_use]
pub fn parse_occurred_on(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%#z") {
        return Some(dt.naive_local());
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// The loaded incident dataset.
///
/// Immutable once built. Cloning shares the same rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    incidents: Arc<[Incident]>,
}

impl Dataset {
    /// Loads the CSV named by `config.path`, reporting progress by bytes
    /// read.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be opened, the header is
    /// missing required columns, a row fails to parse, or an incident
    /// number repeats under [`DuplicatePolicy::Reject`].
    pub fn load(
        config: &DatasetConfig,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, LoadError> {
        let path = &config.path;
        log::info!("Loading incidents from {}", path.display());

        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        if let Ok(metadata) = file.metadata() {
            progress.set_total(metadata.len());
        }
        progress.set_message(format!("Reading {}", path.display()));

        let dataset = Self::read(file, config.duplicate_ids, progress)?;
        progress.finish(format!("Loaded {} incidents", dataset.len()));
        Ok(dataset)
    }

    /// Loads a dataset from any CSV reader.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], minus the file-open failure.
    pub fn from_reader<R: Read>(reader: R, config: &DatasetConfig) -> Result<Self, LoadError> {
        Self::read(reader, config.duplicate_ids, &NullProgress)
    }

    /// Builds a dataset from rows that are already typed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateIncident`] if an incident number
    /// repeats under [`DuplicatePolicy::Reject`].
    pub fn from_incidents(
        incidents: Vec<Incident>,
        policy: DuplicatePolicy,
    ) -> Result<Self, LoadError> {
        let incidents = dedupe(incidents, policy)?;
        Ok(Self {
            incidents: incidents.into(),
        })
    }

    fn read<R: Read>(
        reader: R,
        policy: DuplicatePolicy,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| (*column).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns { columns: missing });
        }

        let mut incidents = Vec::new();
        let mut unparsed_dates = 0usize;
        let mut record = csv::StringRecord::new();

        while reader.read_record(&mut record)? {
            let raw: RawIncident = record.deserialize(Some(&headers))?;
            let has_date = !raw.occurred_on_date.is_empty();
            let incident = Incident::from(raw);
            if has_date && incident.occurred_on.is_none() {
                unparsed_dates += 1;
            }
            incidents.push(incident);

            if incidents.len() % PROGRESS_INTERVAL == 0 {
                progress.set_position(reader.position().byte());
            }
        }

        if unparsed_dates > 0 {
            log::warn!("{unparsed_dates} incidents have an unparseable OCCURRED_ON_DATE");
        }

        let dataset = Self::from_incidents(incidents, policy)?;
        log::info!("Loaded {} incidents", dataset.len());
        Ok(dataset)
    }

    /// Number of incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Returns `true` if the dataset has no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// All incidents in file order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// A view over every incident, in file order.
    #[must_use]
    pub fn table(&self) -> IncidentTable<'_> {
        self.incidents.iter().collect()
    }
}

fn dedupe(incidents: Vec<Incident>, policy: DuplicatePolicy) -> Result<Vec<Incident>, LoadError> {
    let mut seen = BTreeSet::new();
    let mut kept = Vec::with_capacity(incidents.len());
    let mut dropped = 0usize;

    for incident in incidents {
        if seen.contains(&incident.incident_number) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(LoadError::DuplicateIncident {
                        incident_number: incident.incident_number,
                    });
                }
                DuplicatePolicy::KeepFirst => {
                    dropped += 1;
                    continue;
                }
            }
        }
        seen.insert(incident.incident_number.clone());
        kept.push(incident);
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} incidents with a repeated incident number");
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const HEADER: &str = "INCIDENT_NUMBER,OFFENSE_CODE,OFFENSE_DESCRIPTION,DISTRICT,SHOOTING,OCCURRED_ON_DATE,YEAR,MONTH,DAY_OF_WEEK,HOUR,STREET,Lat,Long";

    fn config(policy: DuplicatePolicy) -> DatasetConfig {
        DatasetConfig {
            duplicate_ids: policy,
            ..DatasetConfig::default()
        }
    }

    fn load(csv: &str) -> Result<Dataset, LoadError> {
        Dataset::from_reader(csv.as_bytes(), &config(DuplicatePolicy::Reject))
    }

    #[test]
    fn loads_typed_rows() {
        let csv = format!(
            "{HEADER}\n\
             I230001,3115,INVESTIGATE PERSON,B2,0,2023-05-01 10:15:00+00,2023,5,Monday,10,WASHINGTON ST,42.3296,-71.0844\n\
             I230002,619,LARCENY ALL OTHERS,D4,0,2023-06-06 22:00:00+00,2023,6,Tuesday,22,MAIN ST & 2ND ST,,\n"
        );
        let dataset = load(&csv).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.incidents()[0];
        assert_eq!(first.incident_number, "I230001");
        assert_eq!(first.offense_description, "INVESTIGATE PERSON");
        assert_eq!(first.street, "WASHINGTON ST");
        assert_eq!(first.day_of_week, Some(DayOfWeek::Monday));
        assert_eq!(first.month, Some(Month::May));
        assert_eq!(first.hour, 10);
        assert_eq!(first.coordinates(), Some((42.3296, -71.0844)));
        assert_eq!(
            first.occurred_on.map(|at| at.to_string()),
            Some("2023-05-01 10:15:00".to_string())
        );

        let second = &dataset.incidents()[1];
        assert!(second.is_intersection());
        assert_eq!(second.coordinates(), None);
    }

    #[test]
    fn unrecognized_categories_become_none() {
        let csv = format!(
            "{HEADER}\n\
             I1,1,THEFT,B2,0,not a date,2023,13,Someday,4,A ST,abc,-71.0\n"
        );
        let dataset = load(&csv).unwrap();
        let row = &dataset.incidents()[0];

        assert_eq!(row.day_of_week, None);
        assert_eq!(row.month, None);
        assert_eq!(row.occurred_on, None);
        assert_eq!(row.latitude, None);
        assert_eq!(row.longitude, Some(-71.0));
    }

    #[test]
    fn missing_columns_are_fatal() {
        let csv = "INCIDENT_NUMBER,OFFENSE_DESCRIPTION,STREET,MONTH\nI1,THEFT,A ST,5\n";
        match load(csv) {
            Err(LoadError::MissingColumns { columns }) => {
                assert_eq!(
                    columns,
                    vec!["DAY_OF_WEEK", "HOUR", "OCCURRED_ON_DATE", "Lat", "Long"]
                );
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_hour_is_fatal() {
        let csv = format!("{HEADER}\nI1,1,THEFT,B2,0,2023-05-01,2023,5,Monday,noon,A ST,,\n");
        assert!(matches!(load(&csv), Err(LoadError::Csv(_))));
    }

    #[test]
    fn duplicate_incident_rejected() {
        let csv = format!(
            "{HEADER}\n\
             I1,1,THEFT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I1,2,ASSAULT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n"
        );
        match load(&csv) {
            Err(LoadError::DuplicateIncident { incident_number }) => {
                assert_eq!(incident_number, "I1");
            }
            other => panic!("expected DuplicateIncident, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_incident_keep_first() {
        let csv = format!(
            "{HEADER}\n\
             I1,1,THEFT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I1,2,ASSAULT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I2,2,ASSAULT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n"
        );
        let dataset =
            Dataset::from_reader(csv.as_bytes(), &config(DuplicatePolicy::KeepFirst)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.incidents()[0].offense_description, "THEFT");
        assert_eq!(dataset.incidents()[1].incident_number, "I2");
    }

    #[test]
    fn table_preserves_file_order() {
        let csv = format!(
            "{HEADER}\n\
             I3,1,C,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I1,1,A,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I2,1,B,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n"
        );
        let dataset = load(&csv).unwrap();
        let ids: Vec<&str> = dataset
            .table()
            .iter()
            .map(|row| row.incident_number.as_str())
            .collect();
        assert_eq!(ids, vec!["I3", "I1", "I2"]);
    }

    #[test]
    fn clones_share_rows() {
        let csv = format!("{HEADER}\nI1,1,THEFT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n");
        let dataset = load(&csv).unwrap();
        let clone = dataset.clone();
        assert!(std::ptr::eq(
            dataset.incidents().as_ptr(),
            clone.incidents().as_ptr()
        ));
    }

    #[derive(Default)]
    struct RecordingProgress {
        total: Mutex<Option<u64>>,
        finished: Mutex<Option<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, total: u64) {
            *self.total.lock().unwrap() = Some(total);
        }
        fn set_position(&self, _pos: u64) {}
        fn set_message(&self, _msg: String) {}
        fn finish(&self, msg: String) {
            *self.finished.lock().unwrap() = Some(msg);
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let path = std::env::temp_dir().join("crime_dashboard_missing.csv");
        let _ = std::fs::remove_file(&path);
        let config = DatasetConfig {
            path: path.clone(),
            ..DatasetConfig::default()
        };

        match Dataset::load(&config, &NullProgress) {
            Err(err @ LoadError::Io { .. }) => {
                assert!(err.to_string().contains("crime_dashboard_missing.csv"));
                let LoadError::Io { path: reported, .. } = err else {
                    unreachable!();
                };
                assert_eq!(reported, path);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn load_reports_file_length_and_finishes() {
        let dir = std::env::temp_dir().join("crime_dashboard_load_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("incidents.csv");
        let csv = format!(
            "{HEADER}\n\
             I1,1,THEFT,B2,0,2023-05-01,2023,5,Monday,1,A ST,,\n\
             I2,1,FRAUD,B2,0,2023-05-02,2023,5,Tuesday,2,B ST,,\n"
        );
        std::fs::write(&path, &csv).unwrap();

        let progress = RecordingProgress::default();
        let config = DatasetConfig {
            path,
            ..DatasetConfig::default()
        };
        let dataset = Dataset::load(&config, &progress).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(*progress.total.lock().unwrap(), Some(csv.len() as u64));
        assert_eq!(
            progress.finished.lock().unwrap().as_deref(),
            Some("Loaded 2 incidents")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn parses_supported_timestamp_formats() {
        let expected = "2023-03-15 14:21:00";
        for s in [
            "2023-03-15 14:21:00+00",
            "2023-03-15 14:21:00-05:00",
            "2023-03-15 14:21:00",
            "2023-03-15T14:21:00",
        ] {
            assert_eq!(
                parse_occurred_on(s).map(|at| at.to_string()),
                Some(expected.to_string()),
                "{s}"
            );
        }
        assert_eq!(
            parse_occurred_on("2023-03-15").map(|at| at.to_string()),
            Some("2023-03-15 00:00:00".to_string())
        );
        assert!(parse_occurred_on("15/03/2023").is_none());
    }
}
