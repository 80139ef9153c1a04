//! Cedula-cookie session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use plandoc_core::error::CoreError;
use plandoc_db::models::teacher::Teacher;
use plandoc_db::repositories::TeacherRepo;

use crate::error::AppError;
use crate::state::AppState;

/// The teacher whose cedula is carried by the session cookie.
///
/// Use this as an extractor parameter in any handler that requires a session;
/// every owner-scoped query takes [`TeacherSession::cedula`]:
///
/// ```ignore
/// async fn my_handler(session: TeacherSession) -> AppResult<Json<()>> {
///     tracing::info!(teacher = %session.cedula(), "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing cookie is rejected with 401, a cookie naming no registered
/// teacher with 403.
#[derive(Debug, Clone)]
pub struct TeacherSession {
    pub teacher: Teacher,
}

impl TeacherSession {
    pub fn cedula(&self) -> &str {
        &self.teacher.id
    }
}

impl FromRequestParts<AppState> for TeacherSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = state.config.teacher_cookie_name.as_str();
        let jar = CookieJar::from_headers(&parts.headers);

        let cedula = jar
            .get(cookie_name)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Se requiere la cookie \"{cookie_name}\" para acceder a este recurso."
                )))
            })?;

        let teacher = TeacherRepo::find_by_id(&state.pool, &cedula)
            .await?
            .ok_or_else(|| {
                tracing::debug!(cedula = %cedula, "Session cookie names no registered teacher");
                AppError::Core(CoreError::Forbidden(
                    "No existe un docente registrado con esta cédula.".into(),
                ))
            })?;

        Ok(TeacherSession { teacher })
    }
}
