//! Pure projections of the dataset by location or by year.
//!
//! Filtering never touches the [`Dataset`]; every call builds a fresh borrowed view, so
//! filtering repeatedly with different keys always starts from the full table.

use crate::models::{Dataset, Record};
use std::fmt;

/// Location used when no selection has been made yet.
pub const DEFAULT_LOCATION: &str = "AUS";
/// Year used by [`by_year`] when none is given.
pub const DEFAULT_YEAR: i32 = 1960;

/// Which key a [`FilteredView`] was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKey {
    Location(String),
    Year(i32),
    All,
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::Location(l) => write!(f, "location={l}"),
            FilterKey::Year(y) => write!(f, "year={y}"),
            FilterKey::All => f.write_str("all"),
        }
    }
}

/// Rows of the dataset sharing one key, in original order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    key: FilterKey,
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn key(&self) -> &FilterKey {
        &self.key
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilteredView<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

/// Rows whose location equals `location` exactly ([`DEFAULT_LOCATION`] when `None`).
pub fn by_location<'a>(dataset: &'a Dataset, location: Option<&str>) -> FilteredView<'a> {
    let location = location.unwrap_or(DEFAULT_LOCATION);
    FilteredView {
        key: FilterKey::Location(location.to_string()),
        rows: dataset.iter().filter(|r| r.location == location).collect(),
    }
}

/// Rows whose year equals `year` ([`DEFAULT_YEAR`] when `None`).
pub fn by_year(dataset: &Dataset, year: Option<i32>) -> FilteredView<'_> {
    let year = year.unwrap_or(DEFAULT_YEAR);
    FilteredView {
        key: FilterKey::Year(year),
        rows: dataset.iter().filter(|r| r.year == year).collect(),
    }
}

/// The whole dataset as a view.
pub fn all(dataset: &Dataset) -> FilteredView<'_> {
    FilteredView {
        key: FilterKey::All,
        rows: dataset.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Record::new("AUS", 1960, Some(10.3), None, None),
            Record::new("AUS", 1961, Some(10.5), None, None),
            Record::new("USA", 1960, Some(180.0), None, None),
        ])
    }

    #[test]
    fn location_keeps_original_order() {
        let ds = sample();
        let v = by_location(&ds, Some("AUS"));
        assert_eq!(v.len(), 2);
        assert_eq!(v.rows()[0].year, 1960);
        assert_eq!(v.rows()[1].year, 1961);
    }

    #[test]
    fn defaults_apply() {
        let ds = sample();
        assert_eq!(by_location(&ds, None).key(), &FilterKey::Location("AUS".into()));
        let y = by_year(&ds, None);
        assert_eq!(y.len(), 2);
        assert!(y.iter().all(|r| r.year == 1960));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let ds = sample();
        assert!(by_location(&ds, Some("NZL")).is_empty());
        assert!(by_year(&ds, Some(1999)).is_empty());
    }

    #[test]
    fn repeated_filtering_sees_full_table() {
        let ds = sample();
        let _ = by_location(&ds, Some("USA"));
        assert_eq!(by_location(&ds, Some("AUS")).len(), 2);
        assert_eq!(ds.len(), 3);
    }
}
