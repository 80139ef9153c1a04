//! Route definitions for the `/evaluation-items` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::evaluation_item;
use crate::state::AppState;

/// Routes mounted at `/evaluation-items`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// PUT    /{id}/objectives/{objective_id}    -> link_objective
/// DELETE /{id}/objectives/{objective_id}    -> unlink_objective
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(evaluation_item::get_by_id)
                .put(evaluation_item::update)
                .delete(evaluation_item::delete),
        )
        .route(
            "/{id}/objectives/{objective_id}",
            put(evaluation_item::link_objective).delete(evaluation_item::unlink_objective),
        )
}
