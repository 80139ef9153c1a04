//! Handlers for the `/auth` resource (login, logout, info).
//!
//! Teachers are not created over HTTP; `plandoc-admin` registers them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use plandoc_core::error::CoreError;
use plandoc_core::identity::validate_cedula;
use plandoc_core::types::Timestamp;
use plandoc_db::models::teacher::Teacher;
use plandoc_db::repositories::TeacherRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::TeacherSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub cedula: String,
}

/// Public teacher info returned by login and info.
#[derive(Debug, Serialize)]
pub struct TeacherInfo {
    pub cedula: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub created_at: Timestamp,
}

impl From<Teacher> for TeacherInfo {
    fn from(teacher: Teacher) -> Self {
        Self {
            full_name: teacher.full_name(),
            cedula: teacher.id,
            email: teacher.email,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            created_at: teacher.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the cedula format and that the teacher exists, then store the
/// cedula in an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<TeacherInfo>)> {
    let cedula = input.cedula.trim();
    validate_cedula(cedula)?;

    let teacher = TeacherRepo::find_by_id(&state.pool, cedula)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::invalid(
                "cedula",
                "No existe un docente registrado con esta cédula.",
            ))
        })?;

    let cookie = Cookie::build((state.config.teacher_cookie_name.clone(), teacher.id.clone()))
        .http_only(true)
        .path("/");

    tracing::info!(cedula = %teacher.id, "Teacher logged in");
    Ok((StatusCode::ACCEPTED, jar.add(cookie), Json(teacher.into())))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie.
pub async fn logout(
    State(state): State<AppState>,
    session: TeacherSession,
    jar: CookieJar,
) -> (StatusCode, CookieJar) {
    let cookie = Cookie::build(state.config.teacher_cookie_name.clone()).path("/");
    tracing::info!(cedula = %session.cedula(), "Teacher logged out");
    (StatusCode::ACCEPTED, jar.remove(cookie))
}

/// GET /api/v1/auth/info
pub async fn info(session: TeacherSession) -> Json<TeacherInfo> {
    Json(session.teacher.into())
}
