//! PDF download handlers.
//!
//! Both reports are generated in memory and returned as an attachment. The
//! evaluation plan report is gated: a plan whose weights do not sum to 100,
//! or with an item lacking objectives, is answered with 422 and no bytes.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use plandoc_core::error::CoreError;
use plandoc_core::report::evaluation_plan::EvaluationPlanReport;
use plandoc_core::report::learning_plan::LearningPlanReport;
use plandoc_core::report::generate_report;
use plandoc_core::types::DbId;
use plandoc_db::repositories::{EvaluationPlanRepo, LearningPlanRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::state::AppState;

/// GET /api/v1/learning-plans/{code}/report
pub async fn learning_plan(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<Response> {
    let header = LearningPlanRepo::report_header(&state.pool, session.cedula(), &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("LearningPlan", &code)))?;
    let rows = LearningPlanRepo::report_rows(&state.pool, &code).await?;

    let report = LearningPlanReport {
        header: header.into(),
        objectives: rows.into_iter().map(Into::into).collect(),
    };
    let bytes = generate_report(&report, &state.templates.learning_plan.template)?;

    tracing::info!(
        group_code = %code,
        objectives = report.objectives.len(),
        size = bytes.len(),
        "Learning plan report generated"
    );
    Ok(pdf_attachment(&format!("plan-aprendizaje-{code}"), bytes))
}

/// GET /api/v1/evaluation-plans/{id}/report
pub async fn evaluation_plan(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let plan = EvaluationPlanRepo::find(&state.pool, session.cedula(), id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("EvaluationPlan", id)))?;
    let header = EvaluationPlanRepo::report_header(&state.pool, session.cedula(), id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("EvaluationPlan", id)))?;
    let rows = EvaluationPlanRepo::report_rows(&state.pool, id).await?;

    let report = EvaluationPlanReport {
        header: header.into(),
        plan_name: plan.name,
        items: rows.into_iter().map(Into::into).collect(),
    };
    let bytes = generate_report(&report, &state.templates.evaluation_plan.template).inspect_err(|err| {
        tracing::warn!(evaluation_plan_id = id, error = %err, "Evaluation plan report refused");
    })?;

    tracing::info!(
        evaluation_plan_id = id,
        items = report.items.len(),
        size = bytes.len(),
        "Evaluation plan report generated"
    );
    Ok(pdf_attachment(
        &format!("plan-evaluacion-{}", plan.learning_plan_code),
        bytes,
    ))
}

/// Wrap PDF bytes as a download named `{stem}.pdf`.
fn pdf_attachment(stem: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}.pdf\"", file_stem(stem));
    (
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Reduce a group code to characters that are safe in a header filename.
fn file_stem(raw: &str) -> String {
    let mut stem = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    stem.trim_matches('_').to_string()
}
