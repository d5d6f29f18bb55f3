use chrono::NaiveDate;
use std::collections::HashSet;

use super::dataset::Dataset;

/// Which suppliers the dashboard should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierSelection {
    /// Every supplier present in the dataset.
    All,
    /// Exactly these suppliers. An empty set matches nothing.
    Only(HashSet<String>),
}

impl SupplierSelection {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SupplierSelection::Only(names.into_iter().map(Into::into).collect())
    }
}

/// Supplier set + inclusive entry-date range.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    suppliers: HashSet<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl RecordFilter {
    /// `SupplierSelection::All` is resolved here, against `dataset`, into the
    /// explicit set of distinct suppliers.
    pub fn new(
        dataset: &Dataset,
        selection: SupplierSelection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        let suppliers = match selection {
            SupplierSelection::All => dataset.iter().map(|r| r.supplier().to_string()).collect(),
            SupplierSelection::Only(set) => set,
        };

        if start > end {
            tracing::warn!("Empty date range: {} is after {}", start, end);
        }

        Self {
            suppliers,
            start,
            end,
        }
    }

    pub fn suppliers(&self) -> &HashSet<String> {
        &self.suppliers
    }

    /// Matching records as a new dataset, in source order.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let records = dataset
            .iter()
            .filter(|r| {
                let date = r.entry_date();
                self.suppliers.contains(r.supplier()) && date >= self.start && date <= self.end
            })
            .cloned()
            .collect();
        Dataset::new(records)
    }
}
