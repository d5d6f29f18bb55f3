use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Items with fewer units on hand than this are in critical stock.
pub const CRITICAL_STOCK_THRESHOLD: f64 = 50.0;

// ============================================================================
// Source record
// ============================================================================

/// One validated row of the inventory/profitability source.
///
/// Every field is present: rows with a missing or malformed value never make
/// it past ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub supplier: String,
    pub description: String,
    pub entry_date: NaiveDate,
    pub current_stock: f64,
    pub unit_cost: f64,
    pub unit_sale_value: f64,
    pub gross_profit: f64,
    /// May be negative.
    pub net_profit: f64,
    /// Percentage, may be negative.
    pub margin_percent: f64,
}

// ============================================================================
// Enriched record
// ============================================================================

/// Source record plus the fields derived from it.
///
/// Derived fields are private and only computed by [`EnrichedRecord::enrich`],
/// so they always agree with the source fields. Deserialization reads the
/// source fields only and recomputes the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "InventoryRecord")]
pub struct EnrichedRecord {
    #[serde(flatten)]
    record: InventoryRecord,
    total_inventory_value: f64,
    period_bucket: String,
    is_critical_stock: bool,
    is_loss_making: bool,
}

impl EnrichedRecord {
    pub fn enrich(record: InventoryRecord) -> Self {
        let total_inventory_value = record.current_stock * record.unit_cost;
        let period_bucket = period_bucket(record.entry_date);
        let is_critical_stock = record.current_stock < CRITICAL_STOCK_THRESHOLD;
        let is_loss_making = record.net_profit < 0.0;

        Self {
            record,
            total_inventory_value,
            period_bucket,
            is_critical_stock,
            is_loss_making,
        }
    }

    pub fn source(&self) -> &InventoryRecord {
        &self.record
    }

    pub fn supplier(&self) -> &str {
        &self.record.supplier
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.record.entry_date
    }

    pub fn current_stock(&self) -> f64 {
        self.record.current_stock
    }

    pub fn unit_cost(&self) -> f64 {
        self.record.unit_cost
    }

    pub fn unit_sale_value(&self) -> f64 {
        self.record.unit_sale_value
    }

    pub fn gross_profit(&self) -> f64 {
        self.record.gross_profit
    }

    pub fn net_profit(&self) -> f64 {
        self.record.net_profit
    }

    pub fn margin_percent(&self) -> f64 {
        self.record.margin_percent
    }

    /// `current_stock * unit_cost`
    pub fn total_inventory_value(&self) -> f64 {
        self.total_inventory_value
    }

    /// Year-month of the entry date, `YYYY-MM`.
    pub fn period_bucket(&self) -> &str {
        &self.period_bucket
    }

    pub fn is_critical_stock(&self) -> bool {
        self.is_critical_stock
    }

    pub fn is_loss_making(&self) -> bool {
        self.is_loss_making
    }
}

impl From<InventoryRecord> for EnrichedRecord {
    fn from(record: InventoryRecord) -> Self {
        Self::enrich(record)
    }
}

/// `YYYY-MM` key; sorts lexicographically in calendar order.
pub fn period_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stock: f64, cost: f64, net_profit: f64) -> InventoryRecord {
        InventoryRecord {
            supplier: "Alfa Distribuidora".into(),
            description: "Café torrado 500g".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            current_stock: stock,
            unit_cost: cost,
            unit_sale_value: 120.0,
            gross_profit: 30.0,
            net_profit,
            margin_percent: 12.5,
        }
    }

    #[test]
    fn test_derived_fields() {
        let enriched = EnrichedRecord::enrich(record(40.0, 10.0, -5.0));
        assert_eq!(enriched.total_inventory_value(), 400.0);
        assert_eq!(enriched.period_bucket(), "2024-03");
        assert!(enriched.is_critical_stock());
        assert!(enriched.is_loss_making());
    }

    #[test]
    fn test_threshold_boundaries() {
        let at_threshold = EnrichedRecord::enrich(record(50.0, 1.0, 0.0));
        assert!(!at_threshold.is_critical_stock());
        assert!(!at_threshold.is_loss_making());

        let below = EnrichedRecord::enrich(record(49.99, 1.0, -0.01));
        assert!(below.is_critical_stock());
        assert!(below.is_loss_making());
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let first = EnrichedRecord::enrich(record(60.0, 20.0, 30.0));
        let second = EnrichedRecord::enrich(first.source().clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_deserialize_recomputes_derived_fields() {
        let enriched = EnrichedRecord::enrich(record(60.0, 20.0, 30.0));
        let mut json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["period_bucket"], "2024-03");
        assert_eq!(json["supplier"], "Alfa Distribuidora");

        // Tampered derived fields are ignored on the way back in.
        json["is_loss_making"] = serde_json::Value::Bool(true);
        json["total_inventory_value"] = serde_json::json!(1.0);
        let back: EnrichedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, enriched);
    }

    #[test]
    fn test_period_bucket_pads_month() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        assert_eq!(period_bucket(date), "2023-11");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(period_bucket(date), "2024-01");
    }
}
