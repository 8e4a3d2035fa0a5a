use std::collections::BTreeSet;

use super::model::{Dataset, Gender, Record};
use crate::error::DashboardError;

/// Age window selected when a dataset is first loaded.
pub const DEFAULT_AGE_RANGE: (u32, u32) = (20, 60);

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Inclusive age range. Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Result<Self, DashboardError> {
        if min > max {
            return Err(DashboardError::InvalidAgeRange { min, max });
        }
        Ok(AgeRange { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// The sidebar selection: which countries, genders and ages are shown.
///
/// An empty country or gender set selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub countries: BTreeSet<String>,
    pub genders: BTreeSet<Gender>,
    pub age: AgeRange,
}

impl FilterCriteria {
    /// All countries and genders, with the default age window clamped into
    /// the dataset's observed ages.
    pub fn all(dataset: &Dataset) -> Self {
        let (lo, hi) = DEFAULT_AGE_RANGE;
        let age = match dataset.age_bounds {
            Some((min_age, max_age)) => AgeRange {
                min: lo.clamp(min_age, max_age),
                max: hi.clamp(min_age, max_age),
            },
            None => AgeRange { min: lo, max: hi },
        };
        FilterCriteria {
            countries: dataset.countries.clone(),
            genders: dataset.genders.clone(),
            age,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.age.contains(record.age)
            && self.genders.contains(&record.gender)
            && self.countries.contains(&record.country)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass the criteria, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.countries.is_empty() || criteria.genders.is_empty() {
        // Nothing selected for a column → hide everything
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Non-empty subset of a dataset selected by a [`FilterCriteria`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Wrap already computed indices. Fails with
    /// [`DashboardError::EmptyResult`] when `indices` is empty.
    pub fn new(dataset: &'a Dataset, indices: Vec<usize>) -> Result<Self, DashboardError> {
        if indices.is_empty() {
            return Err(DashboardError::EmptyResult);
        }
        Ok(FilteredView { dataset, indices })
    }

    /// Filter `dataset` with `criteria`.
    pub fn apply(dataset: &'a Dataset, criteria: &FilterCriteria) -> Result<Self, DashboardError> {
        let indices = filtered_indices(dataset, criteria);
        log::debug!("{} of {} records pass the filters", indices.len(), dataset.len());
        Self::new(dataset, indices)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }
}
