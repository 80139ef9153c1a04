use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plandoc_core::error::CoreError;
use plandoc_core::report::ReportError;
use plandoc_core::weights::{ExportBlockedError, OverBudgetError};
use plandoc_db::ItemWriteError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the weight, export and
/// report failures. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `plandoc_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An item write would push the evaluation plan above 100%.
    #[error(transparent)]
    OverBudget(#[from] OverBudgetError),

    /// The evaluation plan does not pass the export gate.
    #[error(transparent)]
    ExportBlocked(#[from] ExportBlockedError),

    /// PDF generation failed for a reason other than the export gate.
    #[error("Report error: {0}")]
    Report(ReportError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Blocked(blocked) => AppError::ExportBlocked(blocked),
            other => AppError::Report(other),
        }
    }
}

impl From<ItemWriteError> for AppError {
    fn from(err: ItemWriteError) -> Self {
        match err {
            ItemWriteError::OverBudget(e) => AppError::OverBudget(e),
            ItemWriteError::NotFound { entity, id } => {
                AppError::Core(CoreError::NotFound { entity, id })
            }
            e @ ItemWriteError::ForeignItem { .. } => {
                AppError::Core(CoreError::invalid("evaluation_item_id", e.to_string()))
            }
            e @ ItemWriteError::ForeignObjective { .. } => {
                AppError::Core(CoreError::invalid("objective_ids", e.to_string()))
            }
            ItemWriteError::Database(e) => AppError::Database(e),
        }
    }
}

/// Body parts of an error response before serialization.
struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    message: String,
    field: Option<&'static str>,
    details: Option<Value>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorBody::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidField { field, message } => ErrorBody {
                    field: Some(*field),
                    ..ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
                },
                CoreError::Conflict(msg) => {
                    ErrorBody::new(StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    ErrorBody::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => {
                    ErrorBody::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Weights and reports ---
            AppError::OverBudget(err) => ErrorBody {
                field: Some("weight"),
                details: Some(json!(err)),
                ..ErrorBody::new(StatusCode::BAD_REQUEST, "WEIGHT_BUDGET_EXCEEDED", err.to_string())
            },
            AppError::ExportBlocked(err) => ErrorBody {
                details: Some(json!(err)),
                ..ErrorBody::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXPORT_BLOCKED",
                    err.to_string(),
                )
            },
            AppError::Report(err) => {
                tracing::error!(error = %err, "Report generation failed");
                ErrorBody::internal()
            }
        };

        let mut json = json!({
            "error": body.message,
            "code": body.code,
        });
        if let Some(field) = body.field {
            json["field"] = json!(field);
        }
        if let Some(details) = body.details {
            json["details"] = details;
        }

        (body.status, axum::Json(json)).into_response()
    }
}

/// Classify a sqlx error into an HTTP error body.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) map to 409.
/// - Foreign-key (`23503`) and check (`23514`) violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => {
            ErrorBody::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") => ErrorBody::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                Some("23503") => ErrorBody::new(
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced row does not exist: {constraint}"),
                ),
                Some("23514") => ErrorBody::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    ErrorBody::internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}
