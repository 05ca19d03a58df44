use contracts::dashboards::d401_issue_report::IssueReportRequest;
use contracts::domain::a002_asset_issue::aggregate::AssetIssue;

use super::export::render_csv;
use super::filter::ReportFilter;
use crate::shared::data::asset_store::AssetStore;
use crate::shared::error::AppError;

const FETCH_FAILED: &str = "Failed to generate report.";

/// Отчёт по выдачам с фильтрами по датам, отделу и сотруднику.
///
/// Некорректная дата отклоняется до обращения к хранилищу.
pub async fn get_filtered_report(
    store: &dyn AssetStore,
    request: IssueReportRequest,
) -> Result<Vec<AssetIssue>, AppError> {
    let filter = ReportFilter::from_request(request).map_err(AppError::Validation)?;
    let rows = store
        .fetch_issues_filtered(&filter)
        .await
        .map_err(|e| AppError::fetch(FETCH_FAILED, e))?;

    if filter.is_empty() {
        tracing::info!("Issue report: {} rows, no filter", rows.len());
    } else {
        tracing::info!("Issue report: {} rows for {:?}", rows.len(), filter);
    }
    Ok(rows)
}

/// CSV-выгрузка того же отчёта
pub async fn export_report_csv(
    store: &dyn AssetStore,
    request: IssueReportRequest,
) -> Result<String, AppError> {
    let rows = get_filtered_report(store, request).await?;
    render_csv(&rows).map_err(|e| AppError::fetch("Failed to export report.", e))
}
