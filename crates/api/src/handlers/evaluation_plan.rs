//! Handlers for the `/evaluation-plans` resource.
//!
//! An evaluation plan is created through its learning plan
//! (`/learning-plans/{code}/evaluation-plan`); everything else addresses it
//! by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use plandoc_core::error::CoreError;
use plandoc_core::types::DbId;
use plandoc_db::models::evaluation_plan::{
    CreateEvaluationPlan, EvaluationPlan, EvaluationPlanDetail, ExportStatus, UpdateEvaluationPlan,
};
use plandoc_db::repositories::EvaluationPlanRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("EvaluationPlan", id))
}

/// GET /api/v1/learning-plans/{code}/evaluation-plan
pub async fn get_for_learning_plan(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<Json<EvaluationPlanDetail>> {
    let plan = EvaluationPlanRepo::find_by_learning_plan(&state.pool, session.cedula(), &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("EvaluationPlan", &code)))?;
    let detail = EvaluationPlanRepo::find_detail(&state.pool, session.cedula(), plan.id)
        .await?
        .ok_or_else(|| not_found(plan.id))?;
    Ok(Json(detail))
}

/// POST /api/v1/learning-plans/{code}/evaluation-plan
///
/// A learning plan has at most one evaluation plan; a second one is a 409.
/// The name defaults to `P.E de {course unit} ({group code})`.
pub async fn create_for_learning_plan(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
    Json(input): Json<CreateEvaluationPlan>,
) -> AppResult<(StatusCode, Json<EvaluationPlan>)> {
    input.validate()?;

    if EvaluationPlanRepo::find_by_learning_plan(&state.pool, session.cedula(), &code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Learning plan {code} already has an evaluation plan"
        ))));
    }

    let plan = EvaluationPlanRepo::create(&state.pool, session.cedula(), &code, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("LearningPlan", &code)))?;

    tracing::info!(
        evaluation_plan_id = plan.id,
        learning_plan = %code,
        "Evaluation plan created"
    );
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/evaluation-plans
pub async fn list(
    State(state): State<AppState>,
    session: TeacherSession,
) -> AppResult<Json<DataResponse<Vec<EvaluationPlan>>>> {
    let plans = EvaluationPlanRepo::list(&state.pool, session.cedula()).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/v1/evaluation-plans/{id}
///
/// The plan with its items, each carrying its linked objectives.
pub async fn get_by_id(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<EvaluationPlanDetail>> {
    let detail = EvaluationPlanRepo::find_detail(&state.pool, session.cedula(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(detail))
}

/// PUT /api/v1/evaluation-plans/{id}
pub async fn update(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvaluationPlan>,
) -> AppResult<Json<EvaluationPlan>> {
    input.validate()?;
    let plan = EvaluationPlanRepo::update(&state.pool, session.cedula(), id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(plan))
}

/// DELETE /api/v1/evaluation-plans/{id}
pub async fn delete(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EvaluationPlanRepo::delete(&state.pool, session.cedula(), id).await? {
        tracing::info!(evaluation_plan_id = id, "Evaluation plan deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/evaluation-plans/{id}/export-status
///
/// Every reason the plan cannot be exported yet. Read-only.
pub async fn export_status(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<ExportStatus>> {
    EvaluationPlanRepo::find(&state.pool, session.cedula(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let items = EvaluationPlanRepo::export_items(&state.pool, id).await?;
    Ok(Json(ExportStatus::from_items(id, &items)))
}
