use axum::Json;
use contracts::shared::indicators::IndicatorCatalogResponse;

use crate::shared::indicators::metadata;

/// GET /api/d100/indicators/catalog
///
/// Returns the full catalogue of KPIs and card sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::catalog().clone())
}
