use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::validation::FieldError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Ошибки прикладного уровня, возвращаемые обработчиками API
#[derive(Debug, Error)]
pub enum AppError {
    /// Хранилище недоступно или вернуло ошибку. Запрос завершается целиком.
    #[error("{message}")]
    Fetch {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    pub fn fetch(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Fetch {
            message,
            source: source.into(),
        }
    }

    /// Map a write failure: unique-key violations become `Conflict`
    pub fn from_write(
        err: anyhow::Error,
        conflict_message: &str,
        failure_message: &'static str,
    ) -> Self {
        if is_unique_violation(&err) {
            AppError::Conflict(conflict_message.to_string())
        } else {
            AppError::fetch(failure_message, err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fetch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<DbErr>() {
        Some(db_err) => {
            matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                || db_err.to_string().contains("UNIQUE constraint failed")
        }
        None => false,
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            AppError::Fetch { message, source } => {
                tracing::error!("{}: {:#}", message, source);
                (message.to_string(), Vec::new())
            }
            AppError::Validation(errors) => {
                let message = errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Invalid request.".to_string());
                (message, errors)
            }
            AppError::NotFound(message) | AppError::Conflict(message) => (message, Vec::new()),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
                errors,
            }),
        )
            .into_response()
    }
}
