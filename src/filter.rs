use crate::dataset::{Dataset, TeamRecord};
use crate::selection::Selection;

/// Records of the dataset whose name is selected, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    records: Vec<TeamRecord>,
}

impl FilteredView {
    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

pub fn filter_records(records: &[TeamRecord], selection: &Selection) -> FilteredView {
    FilteredView {
        records: records
            .iter()
            .filter(|r| selection.contains(&r.name))
            .cloned()
            .collect(),
    }
}

pub fn filter_dataset(dataset: &Dataset, selection: &Selection) -> FilteredView {
    filter_records(dataset.records(), selection)
}
