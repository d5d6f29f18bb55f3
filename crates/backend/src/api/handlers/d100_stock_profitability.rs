use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d100_stock_profitability::{
    DashboardQuery, DashboardRequest, DashboardResponse, FilterOptionsResponse,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::dashboards::d100_stock_profitability::service;
use crate::domain::inventory::LoadedInventory;

/// Cached dataset; the source is read off the async runtime when it has to be loaded.
async fn load_inventory(state: &AppState) -> Result<Arc<LoadedInventory>, StatusCode> {
    let cache = state.cache.clone();

    match tokio::task::spawn_blocking(move || cache.get()).await {
        Ok(Ok(inventory)) => Ok(inventory),
        Ok(Err(e)) => {
            tracing::error!("D100 Dashboard: Failed to load inventory source: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(e) => {
            tracing::error!("D100 Dashboard: Source loading task failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn build_dashboard(
    state: &AppState,
    request: DashboardRequest,
) -> Result<Json<DashboardResponse>, StatusCode> {
    let inventory = load_inventory(state).await?;

    match service::get_dashboard(&inventory, request, state.dashboard_config()) {
        Ok(response) => {
            tracing::info!(
                "D100 Dashboard: Returning {} records, {} KPIs",
                response.record_count,
                response.kpis.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("D100 Dashboard: Rejected request: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// GET /api/d100/dashboard?suppliers=A,B&date_from=2024-01-01&date_to=2024-06-30&top_n=7
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    tracing::info!(
        "D100 Dashboard: Getting dashboard for suppliers={:?} period={:?}..{:?} top_n={:?}",
        query.suppliers,
        query.date_from,
        query.date_to,
        query.top_n
    );

    build_dashboard(&state, query.into()).await
}

/// POST /api/d100/dashboard
pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    tracing::info!(
        "D100 Dashboard: Getting dashboard for {} suppliers period={:?}..{:?} top_n={:?}",
        request
            .suppliers
            .as_ref()
            .map_or_else(|| "all".to_string(), |s| s.len().to_string()),
        request.date_from,
        request.date_to,
        request.top_n
    );

    build_dashboard(&state, request).await
}

/// GET /api/d100/filters
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, StatusCode> {
    let inventory = load_inventory(&state).await?;
    let options = service::get_filter_options(&inventory, state.dashboard_config());

    tracing::info!(
        "D100 Dashboard: Returning {} suppliers",
        options.suppliers.len()
    );
    Ok(Json(options))
}
