use axum::Json;
use contracts::dashboards::d400_asset_dashboard::{AssetDashboardResponse, DistributionEntry};

use super::db;
use crate::dashboards::d400_asset_dashboard::service;
use crate::shared::data::asset_store::SeaOrmAssetStore;
use crate::shared::error::AppError;

/// GET /api/dashboard-stats
pub async fn get_dashboard_stats() -> Result<Json<AssetDashboardResponse>, AppError> {
    let store = SeaOrmAssetStore::new(db()?);
    let response = service::get_dashboard_aggregate(&store).await?;
    Ok(Json(response))
}

/// GET /api/asset-distribution
pub async fn get_distribution() -> Result<Json<Vec<DistributionEntry>>, AppError> {
    let store = SeaOrmAssetStore::new(db()?);
    Ok(Json(service::get_distribution(&store).await?))
}
