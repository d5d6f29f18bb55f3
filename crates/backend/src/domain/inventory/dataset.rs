use chrono::NaiveDate;
use contracts::domain::a001_inventory_record::{EnrichedRecord, InventoryRecord};
use std::collections::BTreeSet;

/// Ordered, immutable collection of enriched records.
///
/// Filtering builds a new `Dataset`; nothing mutates one after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }

    /// Enrich every record, keeping source order.
    pub fn from_source(records: Vec<InventoryRecord>) -> Self {
        Self::new(records.into_iter().map(EnrichedRecord::enrich).collect())
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct supplier names, sorted.
    pub fn suppliers(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.supplier())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Earliest and latest entry date, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.entry_date());
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a EnrichedRecord;
    type IntoIter = std::slice::Iter<'a, EnrichedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        supplier: &str,
        description: &str,
        date: (i32, u32, u32),
        stock: f64,
        cost: f64,
        sale: f64,
        net_profit: f64,
        margin: f64,
    ) -> InventoryRecord {
        InventoryRecord {
            supplier: supplier.into(),
            description: description.into(),
            entry_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            current_stock: stock,
            unit_cost: cost,
            unit_sale_value: sale,
            gross_profit: net_profit,
            net_profit,
            margin_percent: margin,
        }
    }

    /// The two-record reference dataset: A is critical and loss-making, B is neither.
    pub fn two_suppliers() -> Dataset {
        Dataset::from_source(vec![
            record("A", "Produto A", (2024, 1, 10), 40.0, 10.0, 100.0, -5.0, 5.0),
            record("B", "Produto B", (2024, 2, 20), 60.0, 20.0, 200.0, 30.0, 10.0),
        ])
    }
}
