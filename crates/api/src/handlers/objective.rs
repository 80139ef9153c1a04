//! Handlers for the `/objectives` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use plandoc_core::error::CoreError;
use plandoc_core::types::DbId;
use plandoc_db::models::learning_objective::{LearningObjective, UpdateLearningObjective};
use plandoc_db::repositories::LearningObjectiveRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::state::AppState;

/// GET /api/v1/objectives/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<LearningObjective>> {
    let objective = LearningObjectiveRepo::find(&state.pool, session.cedula(), id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("LearningObjective", id)))?;
    Ok(Json(objective))
}

/// PUT /api/v1/objectives/{id}
///
/// Stamps the parent learning plan's `modified_at`.
pub async fn update(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLearningObjective>,
) -> AppResult<Json<LearningObjective>> {
    input.validate()?;
    let objective = LearningObjectiveRepo::update(&state.pool, session.cedula(), id, &input).await?;
    Ok(Json(objective))
}

/// DELETE /api/v1/objectives/{id}
pub async fn delete(
    State(state): State<AppState>,
    session: TeacherSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LearningObjectiveRepo::delete(&state.pool, session.cedula(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("LearningObjective", id)))
    }
}
