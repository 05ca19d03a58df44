use axum::{extract::Query, Json};
use contracts::shared::logger::{LogEntry, LogListQuery};

use super::db;
use crate::shared::error::AppError;
use crate::shared::logger;

const DEFAULT_LIMIT: u64 = 200;

/// GET /api/logs?limit=200
pub async fn list_recent(
    Query(query): Query<LogListQuery>,
) -> Result<Json<Vec<LogEntry>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let logs = logger::repository::list_recent(db()?, limit)
        .await
        .map_err(|e| AppError::fetch("Failed to fetch logs.", e))?;
    Ok(Json(logs))
}
