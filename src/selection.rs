use std::collections::BTreeSet;

use crate::dataset::Dataset;

/// Team names the user has chosen to view. Names outside the dataset are allowed and
/// simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    pub fn all(dataset: &Dataset) -> Self {
        Self::from_names(dataset.team_names())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Returns whether the team is selected after the toggle.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.insert(name);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
