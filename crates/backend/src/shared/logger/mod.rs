pub mod repository;

use sea_orm::DatabaseConnection;

/// Записать событие в журнал `system_log`.
///
/// Ошибка записи журнала не прерывает бизнес-операцию, только логируется.
///
/// # Примеры
/// ```ignore
/// logger::record(db, "transfer", "SN-001", "E100 -> E200").await;
/// ```
pub async fn record(db: &DatabaseConnection, category: &str, subject: &str, message: &str) {
    if let Err(e) = repository::log_event(db, category, subject, message).await {
        tracing::warn!(
            "Failed to write system_log entry [{}] {}: {}",
            category,
            subject,
            e
        );
    }
}
