use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 STOCK PROFITABILITY DASHBOARD
        // ========================================
        .route(
            "/api/d100/filters",
            get(handlers::d100_stock_profitability::get_filter_options),
        )
        .route(
            "/api/d100/dashboard",
            get(handlers::d100_stock_profitability::get_dashboard)
                .post(handlers::d100_stock_profitability::post_dashboard),
        )
        .route(
            "/api/d100/indicators/catalog",
            get(handlers::indicators::get_indicator_catalog),
        )
        .layer(cors)
        .with_state(state)
}
