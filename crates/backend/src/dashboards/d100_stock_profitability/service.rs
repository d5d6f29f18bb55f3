use chrono::NaiveDate;
use contracts::dashboards::d100_stock_profitability::{
    DashboardRequest, DashboardResponse, FilterOptionsResponse, TopNBounds,
};
use thiserror::Error;

use super::charts::build_charts;
use super::insight::period_insight;
use crate::domain::inventory::{LoadedInventory, RecordFilter, SupplierSelection};
use crate::shared::config::DashboardConfig;
use crate::shared::indicators::compute::calculate_kpis;
use crate::shared::indicators::registry::build_indicator_values;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("top_n={value} outside [{min}, {max}]")]
    TopNOutOfRange { value: usize, min: usize, max: usize },
}

fn top_n_bounds(config: &DashboardConfig) -> TopNBounds {
    TopNBounds {
        min: config.min_top_n,
        max: config.max_top_n,
        default: config.default_top_n,
    }
}

/// Requested `top_n`, or the configured default; rejected outside the bounds.
pub fn resolve_top_n(
    requested: Option<usize>,
    config: &DashboardConfig,
) -> Result<usize, DashboardError> {
    let value = requested.unwrap_or(config.default_top_n);
    if value < config.min_top_n || value > config.max_top_n {
        return Err(DashboardError::TopNOutOfRange {
            value,
            min: config.min_top_n,
            max: config.max_top_n,
        });
    }
    Ok(value)
}

/// Filter the dataset and derive every number the dashboard shows.
pub fn get_dashboard(
    inventory: &LoadedInventory,
    request: DashboardRequest,
    config: &DashboardConfig,
) -> Result<DashboardResponse, DashboardError> {
    let top_n = resolve_top_n(request.top_n, config)?;
    let dataset = &inventory.dataset;

    let bounds = dataset.date_bounds();
    let date_from = request.date_from.or(bounds.map(|(min, _)| min));
    let date_to = request.date_to.or(bounds.map(|(_, max)| max));

    let selection = match request.suppliers {
        Some(names) => SupplierSelection::from_names(names),
        None => SupplierSelection::All,
    };

    let filter = RecordFilter::new(
        dataset,
        selection,
        date_from.unwrap_or(NaiveDate::MIN),
        date_to.unwrap_or(NaiveDate::MAX),
    );
    let filtered = filter.apply(dataset);

    tracing::debug!(
        "D100 Dashboard: {} of {} records match {} suppliers",
        filtered.len(),
        dataset.len(),
        filter.suppliers().len()
    );

    let snapshot = calculate_kpis(&filtered);

    Ok(DashboardResponse {
        date_from,
        date_to,
        top_n,
        record_count: filtered.len(),
        kpis: build_indicator_values(&snapshot),
        insight: period_insight(&filtered),
        charts: build_charts(&filtered, top_n),
        rows: filtered.records().to_vec(),
        load_report: inventory.report,
    })
}

/// Supplier list, date bounds and `top_n` limits for the filter sidebar.
pub fn get_filter_options(
    inventory: &LoadedInventory,
    config: &DashboardConfig,
) -> FilterOptionsResponse {
    let dataset = &inventory.dataset;
    let bounds = dataset.date_bounds();

    FilterOptionsResponse {
        suppliers: dataset.suppliers(),
        date_from: bounds.map(|(min, _)| min),
        date_to: bounds.map(|(_, max)| max),
        top_n: top_n_bounds(config),
    }
}
