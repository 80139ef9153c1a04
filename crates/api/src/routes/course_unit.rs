//! Route definitions for the `/course-units` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::course_unit;
use crate::state::AppState;

/// Routes mounted at `/course-units`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{code}    -> get_by_code
/// PUT    /{code}    -> update
/// DELETE /{code}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(course_unit::list).post(course_unit::create))
        .route(
            "/{code}",
            get(course_unit::get_by_code)
                .put(course_unit::update)
                .delete(course_unit::delete),
        )
}
