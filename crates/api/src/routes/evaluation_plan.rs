//! Route definitions for the `/evaluation-plans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{evaluation_item, evaluation_plan, report};
use crate::state::AppState;

/// Routes mounted at `/evaluation-plans`.
///
/// ```text
/// GET    /                     -> list
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
///
/// GET    /{id}/items           -> evaluation_item::list_by_plan
/// POST   /{id}/items           -> evaluation_item::create
///
/// GET    /{id}/export-status   -> export_status
/// GET    /{id}/report          -> report::evaluation_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(evaluation_plan::list))
        .route(
            "/{id}",
            get(evaluation_plan::get_by_id)
                .put(evaluation_plan::update)
                .delete(evaluation_plan::delete),
        )
        .route(
            "/{id}/items",
            get(evaluation_item::list_by_plan).post(evaluation_item::create),
        )
        .route("/{id}/export-status", get(evaluation_plan::export_status))
        .route("/{id}/report", get(report::evaluation_plan))
}
