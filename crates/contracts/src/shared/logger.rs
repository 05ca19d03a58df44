use serde::{Deserialize, Serialize};

/// Запись журнала событий системы (регистрация, выдача, передача, удаление)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub category: String,
    /// Объект события, обычно серийный номер актива
    pub subject: String,
    pub message: String,
}

/// Query string of `GET /api/logs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogListQuery {
    pub limit: Option<u64>,
}
