use axum::{http::StatusCode, Json};
use contracts::domain::a001_registered_asset::aggregate::{
    InventoryItem, RegisteredAsset, RegisteredAssetDto,
};
use serde_json::json;

use super::db;
use crate::domain::a001_registered_asset::service;
use crate::shared::error::AppError;

/// POST /api/register-asset
pub async fn register(
    Json(dto): Json<RegisteredAssetDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let id = service::register(db()?, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Asset registered successfully!",
            "id": id,
        })),
    ))
}

/// GET /api/registered-assets
pub async fn list_all() -> Result<Json<Vec<RegisteredAsset>>, AppError> {
    Ok(Json(service::list_all(db()?).await?))
}

/// GET /api/inventory
pub async fn inventory() -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = service::inventory(db()?).await?;
    tracing::info!("Inventory: returning {} assets", items.len());
    Ok(Json(items))
}
