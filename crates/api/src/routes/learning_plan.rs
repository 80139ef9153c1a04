//! Route definitions for the `/learning-plans` resource.
//!
//! Also nests the plan's objectives, its evaluation plan and its report
//! under `/learning-plans/{code}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{evaluation_plan, learning_plan, report};
use crate::state::AppState;

/// Routes mounted at `/learning-plans`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{code}                    -> get_by_code
/// PUT    /{code}                    -> update
/// DELETE /{code}                    -> delete
///
/// GET    /{code}/objectives         -> list_objectives
/// POST   /{code}/objectives         -> add_objective
///
/// GET    /{code}/evaluation-plan    -> evaluation_plan::get_for_learning_plan
/// POST   /{code}/evaluation-plan    -> evaluation_plan::create_for_learning_plan
///
/// GET    /{code}/report             -> report::learning_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(learning_plan::list).post(learning_plan::create))
        .route(
            "/{code}",
            get(learning_plan::get_by_code)
                .put(learning_plan::update)
                .delete(learning_plan::delete),
        )
        .route(
            "/{code}/objectives",
            get(learning_plan::list_objectives).post(learning_plan::add_objective),
        )
        .route(
            "/{code}/evaluation-plan",
            get(evaluation_plan::get_for_learning_plan)
                .post(evaluation_plan::create_for_learning_plan),
        )
        .route("/{code}/report", get(report::learning_plan))
}
