use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Asset dashboard
        .route(
            "/api/dashboard-stats",
            get(handlers::d400_asset_dashboard::get_dashboard_stats),
        )
        .route(
            "/api/asset-distribution",
            get(handlers::d400_asset_dashboard::get_distribution),
        )
        // D401 Issue report
        .route("/api/reports", get(handlers::d401_issue_report::get_report))
        .route(
            "/api/reports/export",
            get(handlers::d401_issue_report::export_csv),
        )
        // A002 Asset issues
        .route(
            "/api/assets",
            get(handlers::a002_asset_issue::list_all).post(handlers::a002_asset_issue::create),
        )
        .route(
            "/api/assets/:id",
            get(handlers::a002_asset_issue::get_by_id)
                .put(handlers::a002_asset_issue::update)
                .delete(handlers::a002_asset_issue::delete),
        )
        .route(
            "/api/asset-by-employee",
            get(handlers::a002_asset_issue::find_by_employee),
        )
        .route(
            "/api/transfer-asset",
            post(handlers::a002_asset_issue::transfer),
        )
        // A001 Registered assets
        .route(
            "/api/register-asset",
            post(handlers::a001_registered_asset::register),
        )
        .route(
            "/api/registered-assets",
            get(handlers::a001_registered_asset::list_all),
        )
        .route(
            "/api/inventory",
            get(handlers::a001_registered_asset::inventory),
        )
        // Logs
        .route("/api/logs", get(handlers::logs::list_recent))
}
