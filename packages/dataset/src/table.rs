//! Borrowed row views over a [`crate::Dataset`].

use crime_dashboard_incident_models::Incident;

/// An ordered subset of dataset rows.
///
/// Holds shared references into the immutable dataset, so building a
/// view never copies incidents and no view can mutate the rows it sees.
/// Every filter returns a fresh view with its own row list.
#[derive(Debug, Clone, Default)]
pub struct IncidentTable<'a> {
    rows: Vec<&'a Incident>,
}

impl<'a> IncidentTable<'a> {
    /// Creates a view over the given rows, preserving their order.
    #[must_use]
    pub const fn new(rows: Vec<&'a Incident>) -> Self {
        Self { rows }
    }

    /// Number of rows in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the view has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in order.
    #[must_use]
    pub fn rows(&self) -> &[&'a Incident] {
        &self.rows
    }

    /// Iterates the rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Incident> + '_ {
        self.rows.iter().copied()
    }

    /// Returns a new view holding the rows that match `predicate`, in
    /// their original order.
    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&Incident) -> bool) -> Self {
        self.iter().filter(|row| predicate(row)).collect()
    }
}

impl<'a> FromIterator<&'a Incident> for IncidentTable<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Incident>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
