use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_inventory_record::EnrichedRecord;
use crate::shared::indicators::IndicatorValue;

// ============================================================================
// Requests
// ============================================================================

/// Dashboard parameters sent as a JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Accepted suppliers. `None` means every supplier in the dataset,
    /// an empty list matches nothing.
    #[serde(default)]
    pub suppliers: Option<Vec<String>>,
    /// Inclusive start, defaults to the earliest entry date.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive end, defaults to the latest entry date.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Same parameters as [`DashboardRequest`] in query-string form:
/// `?suppliers=A,B&date_from=2024-01-01&date_to=2024-06-30&top_n=7`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated supplier names.
    #[serde(default)]
    pub suppliers: Option<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl From<DashboardQuery> for DashboardRequest {
    fn from(query: DashboardQuery) -> Self {
        let suppliers = query.suppliers.map(|raw| {
            raw.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        });
        Self {
            suppliers,
            date_from: query.date_from,
            date_to: query.date_to,
            top_n: query.top_n,
        }
    }
}

// ============================================================================
// Charts
// ============================================================================

/// One bar / point of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

impl CategoryValue {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// Item counts in critical vs normal stock. Shares are left to the consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalStockSplit {
    pub critical: usize,
    pub normal: usize,
}

impl CriticalStockSplit {
    pub fn total(&self) -> usize {
        self.critical + self.normal
    }
}

/// Products ranked by loss, most negative first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LossRanking {
    /// No loss-making record in the dataset.
    NoLosses,
    Ranked { items: Vec<CategoryValue> },
}

impl LossRanking {
    pub fn items(&self) -> &[CategoryValue] {
        match self {
            LossRanking::NoLosses => &[],
            LossRanking::Ranked { items } => items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub profit_by_supplier: Vec<CategoryValue>,
    pub margin_by_product: Vec<CategoryValue>,
    pub monthly_profit_trend: Vec<CategoryValue>,
    pub critical_stock_split: CriticalStockSplit,
    pub loss_making_products: LossRanking,
}

// ============================================================================
// Period insight
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTone {
    Info,
    Warning,
}

/// Latest period against the period right before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodInsight {
    pub current_period: String,
    pub previous_period: String,
    pub current_net_profit: f64,
    pub previous_net_profit: f64,
    /// `None` when the previous period's profit is (close to) zero.
    pub change_percent: Option<f64>,
    pub direction: TrendDirection,
    pub critical_stock_count: usize,
    pub tone: InsightTone,
    pub message: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Row counts from the last source load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub top_n: usize,
    pub record_count: usize,
    /// KPI cards in fixed order.
    pub kpis: Vec<IndicatorValue>,
    pub insight: Option<PeriodInsight>,
    pub charts: DashboardCharts,
    /// Filtered rows for the detail table.
    pub rows: Vec<EnrichedRecord>,
    pub load_report: LoadReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNBounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Values for the filter sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    /// Distinct suppliers, sorted.
    pub suppliers: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub top_n: TopNBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_splits_suppliers() {
        let query = DashboardQuery {
            suppliers: Some("Alfa, Beta ,,Gama".into()),
            ..Default::default()
        };
        let request = DashboardRequest::from(query);
        assert_eq!(
            request.suppliers,
            Some(vec!["Alfa".to_string(), "Beta".to_string(), "Gama".to_string()])
        );
    }

    #[test]
    fn test_query_without_suppliers_means_all() {
        let request = DashboardRequest::from(DashboardQuery::default());
        assert!(request.suppliers.is_none());
    }

    #[test]
    fn test_loss_ranking_states_serialize_distinctly() {
        let none = serde_json::to_value(LossRanking::NoLosses).unwrap();
        assert_eq!(none["state"], "no_losses");

        let zero = LossRanking::Ranked {
            items: vec![CategoryValue::new("Produto X", 0.0)],
        };
        let zero = serde_json::to_value(zero).unwrap();
        assert_eq!(zero["state"], "ranked");
        assert_eq!(zero["items"][0]["value"], 0.0);
    }
}
