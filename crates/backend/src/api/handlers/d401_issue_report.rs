use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d401_issue_report::IssueReportRequest;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;

use super::db;
use crate::dashboards::d401_issue_report::service;
use crate::shared::data::asset_store::SeaOrmAssetStore;
use crate::shared::error::AppError;

/// GET /api/reports?startDate=2024-01-01&endDate=2024-01-31&department=&user=
pub async fn get_report(
    Query(request): Query<IssueReportRequest>,
) -> Result<Json<Vec<AssetIssue>>, AppError> {
    let store = SeaOrmAssetStore::new(db()?);
    Ok(Json(service::get_filtered_report(&store, request).await?))
}

/// GET /api/reports/export
pub async fn export_csv(Query(request): Query<IssueReportRequest>) -> Result<Response, AppError> {
    let store = SeaOrmAssetStore::new(db()?);
    let csv = service::export_report_csv(&store, request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"asset_report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
