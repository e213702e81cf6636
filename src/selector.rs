//! Location choices for the dropdown and the current selection.

use crate::filter::DEFAULT_LOCATION;
use crate::models::Dataset;
use std::collections::BTreeSet;

/// Distinct locations in the dataset, sorted ascending.
pub fn distinct_locations(dataset: &Dataset) -> Vec<String> {
    dataset
        .iter()
        .map(|r| r.location.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    choices: Vec<String>,
    selected: String,
}

impl Selector {
    /// Choices from the dataset; the initial selection is the default location, even when
    /// the dataset does not contain it (the chart then renders empty).
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            choices: distinct_locations(dataset),
            selected: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Change the selection. Returns `true` when it actually changed.
    pub fn select(&mut self, key: &str) -> bool {
        if self.selected == key {
            return false;
        }
        self.selected = key.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[test]
    fn choices_are_sorted_and_distinct() {
        let ds = Dataset::new(vec![
            Record::new("USA", 1960, None, None, None),
            Record::new("AUS", 1960, None, None, None),
            Record::new("USA", 1961, None, None, None),
            Record::new("BRA", 1960, None, None, None),
        ]);
        let sel = Selector::from_dataset(&ds);
        assert_eq!(sel.choices(), ["AUS", "BRA", "USA"]);
        assert_eq!(sel.selected(), "AUS");
    }

    #[test]
    fn select_reports_change() {
        let mut sel = Selector::from_dataset(&Dataset::default());
        assert!(sel.choices().is_empty());
        assert!(sel.select("USA"));
        assert!(!sel.select("USA"));
        assert_eq!(sel.selected(), "USA");
    }
}
