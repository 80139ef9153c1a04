//! Route definitions for the `/objectives` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::objective;
use crate::state::AppState;

/// Routes mounted at `/objectives`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(objective::get_by_id)
            .put(objective::update)
            .delete(objective::delete),
    )
}
