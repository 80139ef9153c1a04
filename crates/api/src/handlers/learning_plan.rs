//! Handlers for the `/learning-plans` resource and its objectives.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use plandoc_core::error::CoreError;
use plandoc_db::models::learning_objective::{CreateLearningObjective, LearningObjective};
use plandoc_db::models::learning_plan::{
    CreateLearningPlan, LearningPlan, LearningPlanDetail, UpdateLearningPlan,
};
use plandoc_db::repositories::{LearningObjectiveRepo, LearningPlanRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::response::DataResponse;
use crate::state::AppState;

fn plan_not_found(group_code: &str) -> AppError {
    AppError::Core(CoreError::not_found("LearningPlan", group_code))
}

/// POST /api/v1/learning-plans
pub async fn create(
    State(state): State<AppState>,
    session: TeacherSession,
    Json(input): Json<CreateLearningPlan>,
) -> AppResult<(StatusCode, Json<LearningPlan>)> {
    input.validate()?;
    let plan = LearningPlanRepo::create(&state.pool, session.cedula(), &input).await?;
    tracing::info!(
        group_code = %plan.group_code,
        teacher = %session.cedula(),
        "Learning plan created"
    );
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/learning-plans
pub async fn list(
    State(state): State<AppState>,
    session: TeacherSession,
) -> AppResult<Json<DataResponse<Vec<LearningPlan>>>> {
    let plans = LearningPlanRepo::list(&state.pool, session.cedula()).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/v1/learning-plans/{code}
///
/// The plan with its objectives embedded.
pub async fn get_by_code(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<Json<LearningPlanDetail>> {
    let detail = LearningPlanRepo::find_detail(&state.pool, session.cedula(), &code)
        .await?
        .ok_or_else(|| plan_not_found(&code))?;
    Ok(Json(detail))
}

/// PUT /api/v1/learning-plans/{code}
pub async fn update(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
    Json(input): Json<UpdateLearningPlan>,
) -> AppResult<Json<LearningPlan>> {
    input.validate()?;
    let plan = LearningPlanRepo::update(&state.pool, session.cedula(), &code, &input)
        .await?
        .ok_or_else(|| plan_not_found(&code))?;
    Ok(Json(plan))
}

/// DELETE /api/v1/learning-plans/{code}
pub async fn delete(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    if LearningPlanRepo::delete(&state.pool, session.cedula(), &code).await? {
        tracing::info!(group_code = %code, "Learning plan deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(plan_not_found(&code))
    }
}

/// GET /api/v1/learning-plans/{code}/objectives
pub async fn list_objectives(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<Vec<LearningObjective>>>> {
    LearningPlanRepo::find(&state.pool, session.cedula(), &code)
        .await?
        .ok_or_else(|| plan_not_found(&code))?;
    let objectives = LearningObjectiveRepo::list_by_plan(&state.pool, &code).await?;
    Ok(Json(DataResponse { data: objectives }))
}

/// POST /api/v1/learning-plans/{code}/objectives
pub async fn add_objective(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(code): Path<String>,
    Json(input): Json<CreateLearningObjective>,
) -> AppResult<(StatusCode, Json<LearningObjective>)> {
    input.validate()?;
    let objective =
        LearningObjectiveRepo::create(&state.pool, session.cedula(), &code, &input).await?;
    Ok((StatusCode::CREATED, Json(objective)))
}
