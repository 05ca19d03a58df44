use contracts::dashboards::d400_asset_dashboard::{AssetDashboardResponse, DistributionEntry};

use super::classification::build_distribution;
use super::pivot::build_pivot;
use crate::shared::data::asset_store::AssetStore;
use crate::shared::error::AppError;

const FETCH_FAILED: &str = "Failed to generate dashboard statistics.";

/// Сводная таблица, распределение и итоги дашборда активов.
///
/// Пересчитывается из текущих строк хранилища при каждом вызове. Ошибка
/// чтения возвращается как `AppError::Fetch`; пустое хранилище даёт нули.
pub async fn get_dashboard_aggregate(
    store: &dyn AssetStore,
) -> Result<AssetDashboardResponse, AppError> {
    let issues = store
        .fetch_all_issues()
        .await
        .map_err(|e| AppError::fetch(FETCH_FAILED, e))?;
    let registered = store
        .fetch_registered_with_issue_flag()
        .await
        .map_err(|e| AppError::fetch(FETCH_FAILED, e))?;

    let (pivot, totals) = build_pivot(&issues, &registered);
    let distribution = build_distribution(&issues);

    tracing::info!(
        "Dashboard aggregate: {} issued, {} available, {} device rows, {} departments",
        totals.issued_total,
        totals.available_total,
        pivot.rows.len(),
        pivot.departments.len()
    );

    Ok(AssetDashboardResponse {
        pivot,
        distribution,
        totals,
    })
}

/// Только серия распределения (для круговой диаграммы)
pub async fn get_distribution(store: &dyn AssetStore) -> Result<Vec<DistributionEntry>, AppError> {
    let issues = store
        .fetch_all_issues()
        .await
        .map_err(|e| AppError::fetch("Failed to fetch asset distribution.", e))?;
    Ok(build_distribution(&issues))
}
