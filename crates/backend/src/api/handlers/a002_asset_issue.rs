use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_asset_issue::aggregate::{
    AssetIssue, AssetIssueDto, AssetTransferRequest,
};
use serde::Deserialize;
use serde_json::json;

use super::db;
use crate::domain::a002_asset_issue::service;
use crate::shared::error::AppError;

#[derive(Debug, Deserialize)]
pub struct EmployeeSearchQuery {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// GET /api/assets
pub async fn list_all() -> Result<Json<Vec<AssetIssue>>, AppError> {
    Ok(Json(service::list_all(db()?).await?))
}

/// GET /api/assets/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<AssetIssue>, AppError> {
    Ok(Json(service::get_by_id(db()?, &id).await?))
}

/// POST /api/assets
pub async fn create(
    Json(dto): Json<AssetIssueDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let id = service::create(db()?, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "New asset issue created successfully!",
            "id": id,
        })),
    ))
}

/// PUT /api/assets/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<AssetIssueDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    service::update(db()?, &id, dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Asset updated successfully!",
    })))
}

/// DELETE /api/assets/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    service::delete(db()?, &id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Asset deleted successfully!",
    })))
}

/// GET /api/asset-by-employee?searchTerm=...
pub async fn find_by_employee(
    Query(query): Query<EmployeeSearchQuery>,
) -> Result<Json<AssetIssue>, AppError> {
    Ok(Json(
        service::find_by_employee(db()?, query.search_term).await?,
    ))
}

/// POST /api/transfer-asset
pub async fn transfer(
    Json(request): Json<AssetTransferRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let issue = service::transfer(db()?, request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Asset transferred successfully!",
        "id": issue.id,
        "asset": issue,
    })))
}
