//! Handlers for evaluation items and their objective links.
//!
//! Creates and updates are checked against the plan's weight budget by the
//! repository; an over-budget write is answered with 400
//! `WEIGHT_BUDGET_EXCEEDED` and leaves the plan unchanged.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use plandoc_core::error::CoreError;
use plandoc_core::types::DbId;
use plandoc_db::models::evaluation_item::{
    CreateEvaluationItem, EvaluationItem, UpdateEvaluationItem,
};
use plandoc_db::models::learning_objective::LearningObjective;
use plandoc_db::repositories::{EvaluationItemRepo, EvaluationPlanRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("EvaluationItem", id))
}

/// GET /api/v1/evaluation-plans/{id}/items
pub async fn list_by_plan(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(evaluation_plan_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EvaluationItem>>>> {
    EvaluationPlanRepo::find(&state.pool, session.cedula(), evaluation_plan_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "EvaluationPlan",
            evaluation_plan_id,
        )))?;
    let items = EvaluationItemRepo::list_by_plan(&state.pool, evaluation_plan_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/evaluation-plans/{id}/items
pub async fn create(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(evaluation_plan_id): Path<DbId>,
    Json(input): Json<CreateEvaluationItem>,
) -> AppResult<(StatusCode, Json<EvaluationItem>)> {
    input.validate()?;
    let item =
        EvaluationItemRepo::create(&state.pool, session.cedula(), evaluation_plan_id, &input)
            .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/evaluation-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<EvaluationItem>> {
    let item = EvaluationItemRepo::find(&state.pool, session.cedula(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// PUT /api/v1/evaluation-items/{id}
///
/// A present `objective_ids` replaces the item's linked objectives.
pub async fn update(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvaluationItem>,
) -> AppResult<Json<EvaluationItem>> {
    input.validate()?;
    let item = EvaluationItemRepo::update(&state.pool, session.cedula(), id, &input).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/evaluation-items/{id}
///
/// Linked objectives are kept with their link cleared.
pub async fn delete(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EvaluationItemRepo::delete(&state.pool, session.cedula(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/v1/evaluation-items/{id}/objectives/{objective_id}
pub async fn link_objective(
    State(state): State<AppState>,
    session: TeacherSession,
    Path((id, objective_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<LearningObjective>> {
    let objective =
        EvaluationItemRepo::link_objective(&state.pool, session.cedula(), id, objective_id)
            .await?;
    Ok(Json(objective))
}

/// DELETE /api/v1/evaluation-items/{id}/objectives/{objective_id}
pub async fn unlink_objective(
    State(state): State<AppState>,
    session: TeacherSession,
    Path((id, objective_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if EvaluationItemRepo::unlink_objective(&state.pool, session.cedula(), id, objective_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ObjectiveLink",
            id: format!("{id}/{objective_id}"),
        }))
    }
}
