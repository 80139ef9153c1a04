//! `AppError` to HTTP response mapping, exercised without a server by
//! calling `IntoResponse` directly.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use plandoc_api::error::AppError;
use plandoc_core::error::CoreError;
use plandoc_core::report::ReportError;
use plandoc_core::weights::{ExportBlockedError, OverBudgetError};
use plandoc_db::ItemWriteError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("LearningPlan", "INF-MAT-1"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "LearningPlan with id INF-MAT-1 not found");
    assert!(json.get("field").is_none());
}

#[tokio::test]
async fn invalid_field_names_the_field() {
    let err = AppError::Core(CoreError::invalid("cedula", "Formato de cédula inválido"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "cedula");
    assert_eq!(json["error"], "Formato de cédula inválido");
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no session".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("unknown teacher".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate group".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn over_budget_carries_remaining_weight() {
    let err = AppError::OverBudget(OverBudgetError {
        attempted_weight: 10,
        current_total: 95,
        remaining: 5,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "WEIGHT_BUDGET_EXCEEDED");
    assert_eq!(json["field"], "weight");
    assert_eq!(json["details"]["remaining"], 5);
    assert!(json["error"].as_str().unwrap().contains("disponible 5%"));
}

#[tokio::test]
async fn blocked_report_returns_422_with_reason() {
    let err = AppError::from(ReportError::Blocked(ExportBlockedError::IncompleteWeight {
        current_total: 75,
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "EXPORT_BLOCKED");
    assert_eq!(json["details"]["kind"], "incomplete_weight");
    assert_eq!(json["details"]["current_total"], 75);
}

#[tokio::test]
async fn broken_template_is_an_opaque_500() {
    let err = AppError::from(ReportError::Template("missing /Contents".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn foreign_objective_is_a_field_error() {
    let err = AppError::from(ItemWriteError::ForeignObjective {
        objective_id: 7,
        learning_plan_code: "INF-MAT-1".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "objective_ids");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unexpected_database_error_is_sanitized() {
    let err = AppError::Database(sqlx::Error::Protocol(
        "connection string postgres://secret".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}
