#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime incident record type and calendar enumerations.
//!
//! Every row of the incident export is parsed into an [`Incident`]. The
//! day-of-week and month columns are resolved into the closed
//! [`DayOfWeek`] and [`Month`] enumerations at the load boundary, so the
//! aggregators never deal with raw strings for chart axes.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Day of the week, in canonical chart order (Sunday first).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DayOfWeek {
    /// Sunday
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl DayOfWeek {
    /// Returns all days in canonical week order, starting Sunday.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }

    /// Three-letter abbreviation used as the axis label (`"Sun"`, `"Mon"`, ...).
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    /// Resolves a raw day value by its first three characters.
    ///
    /// The match is case-sensitive, so `"Monday"` and `"Mon"` resolve but
    /// `"MONDAY"` does not. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn from_abbreviation(raw: &str) -> Option<Self> {
        let prefix = raw.trim().get(..3)?;
        Self::all()
            .iter()
            .copied()
            .find(|day| day.abbreviation() == prefix)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

/// Calendar month. Ordering is chronological.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Month {
    /// January
    January = 1,
    /// February
    February = 2,
    /// March
    March = 3,
    /// April
    April = 4,
    /// May
    May = 5,
    /// June
    June = 6,
    /// July
    July = 7,
    /// August
    August = 8,
    /// September
    September = 9,
    /// October
    October = 10,
    /// November
    November = 11,
    /// December
    December = 12,
}

impl Month {
    /// Returns the month number (1-12).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Creates a month from its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-12.
    pub const fn from_number(value: u8) -> Result<Self, InvalidMonthError> {
        match value {
            1 => Ok(Self::January),
            2 => Ok(Self::February),
            3 => Ok(Self::March),
            4 => Ok(Self::April),
            5 => Ok(Self::May),
            6 => Ok(Self::June),
            7 => Ok(Self::July),
            8 => Ok(Self::August),
            9 => Ok(Self::September),
            10 => Ok(Self::October),
            11 => Ok(Self::November),
            12 => Ok(Self::December),
            _ => Err(InvalidMonthError { value }),
        }
    }

    /// Returns the month a calendar date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::all()[date.month0() as usize]
    }

    /// Returns all months in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }
}

/// Error returned when attempting to create a [`Month`] from a number
/// outside 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The invalid month value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month value {}: expected 1-12", self.value)
    }
}

impl std::error::Error for InvalidMonthError {}

/// Marker that splits an intersection street value (`"MAIN ST & 2ND ST"`).
pub const INTERSECTION_MARKER: char = '&';

/// One recorded crime report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique incident number assigned by the reporting agency.
    pub incident_number: String,
    /// Offense description, e.g. `"LARCENY SHOPLIFTING"`.
    pub offense_description: String,
    /// Street name in upper case. Empty when the source cell was blank.
    pub street: String,
    /// Day of the week, `None` when the source value was unrecognized.
    pub day_of_week: Option<DayOfWeek>,
    /// Month, `None` when the source value was outside 1-12.
    pub month: Option<Month>,
    /// Hour of day the incident occurred (0-23).
    pub hour: u8,
    /// When the incident occurred, if the timestamp could be parsed.
    pub occurred_on: Option<NaiveDateTime>,
    /// Latitude, if reported.
    pub latitude: Option<f64>,
    /// Longitude, if reported.
    pub longitude: Option<f64>,
}

impl Incident {
    /// Returns `true` if the street value names an intersection rather
    /// than a single street.
    #[must_use]
    pub fn is_intersection(&self) -> bool {
        self.street.contains(INTERSECTION_MARKER)
    }

    /// Returns `(latitude, longitude)` when both are present and non-zero.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude?;
        let longitude = self.longitude?;
        if latitude == 0.0 || longitude == 0.0 {
            return None;
        }
        Some((latitude, longitude))
    }

    /// Month derived from the occurrence timestamp rather than the
    /// precomputed column.
    #[must_use]
    pub fn occurred_month(&self) -> Option<Month> {
        self.occurred_on.map(|at| Month::of(at.date()))
    }

    /// Day of the week derived from the occurrence timestamp rather than
    /// the precomputed column.
    #[must_use]
    pub fn occurred_day(&self) -> Option<DayOfWeek> {
        self.occurred_on.map(|at| DayOfWeek::from(at.weekday()))
    }
}
