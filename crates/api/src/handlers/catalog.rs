//! Handler for the `/catalogs` resource.

use axum::Json;
use plandoc_core::catalog::Catalogs;

use crate::middleware::auth::TeacherSession;

/// GET /api/v1/catalogs
///
/// Every enumerated choice (tracks, campuses, strategies, ...) with its label.
pub async fn list(_session: TeacherSession) -> Json<Catalogs> {
    Json(Catalogs::all())
}
