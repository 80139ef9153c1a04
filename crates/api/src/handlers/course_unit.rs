//! Handlers for the `/course-units` resource.
//!
//! Course units are shared reference data: any teacher with a session may
//! manage them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use plandoc_core::error::CoreError;
use plandoc_db::models::course_unit::{CourseUnit, CreateCourseUnit, UpdateCourseUnit};
use plandoc_db::repositories::CourseUnitRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/course-units
pub async fn create(
    State(state): State<AppState>,
    _session: TeacherSession,
    Json(input): Json<CreateCourseUnit>,
) -> AppResult<(StatusCode, Json<CourseUnit>)> {
    input.validate()?;
    let course_unit = CourseUnitRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(course_unit)))
}

/// GET /api/v1/course-units
pub async fn list(
    State(state): State<AppState>,
    _session: TeacherSession,
) -> AppResult<Json<DataResponse<Vec<CourseUnit>>>> {
    let course_units = CourseUnitRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: course_units }))
}

/// GET /api/v1/course-units/{code}
pub async fn get_by_code(
    State(state): State<AppState>,
    _session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<Json<CourseUnit>> {
    let course_unit = CourseUnitRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("CourseUnit", &code)))?;
    Ok(Json(course_unit))
}

/// PUT /api/v1/course-units/{code}
pub async fn update(
    State(state): State<AppState>,
    _session: TeacherSession,
    Path(code): Path<String>,
    Json(input): Json<UpdateCourseUnit>,
) -> AppResult<Json<CourseUnit>> {
    input.validate()?;
    let course_unit = CourseUnitRepo::update(&state.pool, &code, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("CourseUnit", &code)))?;
    Ok(Json(course_unit))
}

/// DELETE /api/v1/course-units/{code}
///
/// Cascades to every learning plan of the course unit.
pub async fn delete(
    State(state): State<AppState>,
    _session: TeacherSession,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    if CourseUnitRepo::delete(&state.pool, &code).await? {
        tracing::info!(code = %code, "Course unit deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("CourseUnit", &code)))
    }
}
