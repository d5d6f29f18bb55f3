use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator identity & display metadata
// ---------------------------------------------------------------------------

/// Fixed set of KPI identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiId {
    TotalSales,
    TotalInventoryCost,
    NetProfitTotal,
    AverageMargin,
    CriticalStockCount,
    LossMakingCount,
    InventoryTurnover,
    AverageTicket,
    ProfitToSalesPercent,
}

impl KpiId {
    pub const ALL: [KpiId; 9] = [
        KpiId::TotalSales,
        KpiId::TotalInventoryCost,
        KpiId::NetProfitTotal,
        KpiId::AverageMargin,
        KpiId::CriticalStockCount,
        KpiId::LossMakingCount,
        KpiId::InventoryTurnover,
        KpiId::AverageTicket,
        KpiId::ProfitToSalesPercent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiId::TotalSales => "total_sales",
            KpiId::TotalInventoryCost => "total_inventory_cost",
            KpiId::NetProfitTotal => "net_profit_total",
            KpiId::AverageMargin => "average_margin",
            KpiId::CriticalStockCount => "critical_stock_count",
            KpiId::LossMakingCount => "loss_making_count",
            KpiId::InventoryTurnover => "inventory_turnover",
            KpiId::AverageTicket => "average_ticket",
            KpiId::ProfitToSalesPercent => "profit_to_sales_percent",
        }
    }
}

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
    Warning,
}

/// Static metadata describing one indicator (label, format, icon, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub id: KpiId,
    pub label: String,
    pub short_label: Option<String>,
    pub icon: String,
    pub format: ValueFormat,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Indicator sets
// ---------------------------------------------------------------------------

/// Metadata for a group of indicators rendered together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSetMeta {
    pub id: String,
    pub label: String,
    pub indicators: Vec<KpiId>,
    /// Number of columns in the card grid (2, 3, 4).
    pub columns: u8,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// Every KPI for one dataset, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_sales: f64,
    pub total_inventory_cost: f64,
    pub net_profit_total: f64,
    /// `None` when the dataset is empty: no data is not a zero average.
    pub average_margin: Option<f64>,
    pub critical_stock_count: usize,
    pub loss_making_count: usize,
    pub inventory_turnover: f64,
    pub average_ticket: f64,
    pub profit_to_sales_percent: f64,
}

impl KpiSnapshot {
    /// Scalar value of one KPI; counts are widened to `f64`.
    pub fn get(&self, id: KpiId) -> Option<f64> {
        match id {
            KpiId::TotalSales => Some(self.total_sales),
            KpiId::TotalInventoryCost => Some(self.total_inventory_cost),
            KpiId::NetProfitTotal => Some(self.net_profit_total),
            KpiId::AverageMargin => self.average_margin,
            KpiId::CriticalStockCount => Some(self.critical_stock_count as f64),
            KpiId::LossMakingCount => Some(self.loss_making_count as f64),
            KpiId::InventoryTurnover => Some(self.inventory_turnover),
            KpiId::AverageTicket => Some(self.average_ticket),
            KpiId::ProfitToSalesPercent => Some(self.profit_to_sales_percent),
        }
    }

    /// The KPI mapping in fixed order.
    pub fn entries(&self) -> Vec<(KpiId, Option<f64>)> {
        KpiId::ALL.iter().map(|id| (*id, self.get(*id))).collect()
    }
}

/// A single computed indicator, ready for a KPI card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: KpiId,
    /// Primary numeric value (`None` when data is unavailable).
    pub value: Option<f64>,
    /// `value` rendered with the catalogue format, `"N/A"` when unavailable.
    pub display: String,
    pub status: IndicatorStatus,
    /// Optional secondary text displayed below the value.
    pub subtitle: Option<String>,
}

/// Full catalogue returned by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCatalogResponse {
    pub indicators: Vec<IndicatorMeta>,
    pub sets: Vec<IndicatorSetMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> KpiSnapshot {
        KpiSnapshot {
            total_sales: 300.0,
            total_inventory_cost: 1600.0,
            net_profit_total: 25.0,
            average_margin: None,
            critical_stock_count: 1,
            loss_making_count: 2,
            inventory_turnover: 0.1875,
            average_ticket: 150.0,
            profit_to_sales_percent: 25.0 / 3.0,
        }
    }

    #[test]
    fn test_entries_follow_fixed_order() {
        let ids: Vec<KpiId> = snapshot().entries().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, KpiId::ALL.to_vec());
    }

    #[test]
    fn test_undefined_margin_is_not_zero() {
        let s = snapshot();
        assert_eq!(s.get(KpiId::AverageMargin), None);
        assert_eq!(s.get(KpiId::LossMakingCount), Some(2.0));
    }

    #[test]
    fn test_kpi_id_serializes_as_snake_case() {
        for id in KpiId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
