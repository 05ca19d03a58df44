// Aggregate handlers (a001-a002)
pub mod a001_registered_asset;
pub mod a002_asset_issue;

// Dashboard handlers (d400-d401)
pub mod d400_asset_dashboard;
pub mod d401_issue_report;

pub mod logs;

use sea_orm::DatabaseConnection;

use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

/// Global connection, or a fetch error when startup did not open one
pub(crate) fn db() -> Result<&'static DatabaseConnection, AppError> {
    get_connection().map_err(|e| AppError::fetch("Database is not available.", e))
}
