pub mod auth;
pub mod course_unit;
pub mod evaluation_item;
pub mod evaluation_plan;
pub mod health;
pub mod learning_plan;
pub mod objective;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                        login (public)
/// /auth/logout                                       logout
/// /auth/info                                         session teacher
///
/// /catalogs                                          enumerated choices
///
/// /course-units                                      list, create
/// /course-units/{code}                               get, update, delete
///
/// /learning-plans                                    list, create
/// /learning-plans/{code}                             get (with objectives), update, delete
/// /learning-plans/{code}/objectives                  list, add
/// /learning-plans/{code}/evaluation-plan             get, create (one per plan)
/// /learning-plans/{code}/report                      PDF download
///
/// /objectives/{id}                                   get, update, delete
///
/// /evaluation-plans                                  list
/// /evaluation-plans/{id}                             get (with items), update, delete
/// /evaluation-plans/{id}/items                       list, add (budget-checked)
/// /evaluation-plans/{id}/export-status               export gate violations
/// /evaluation-plans/{id}/report                      PDF download (gated)
///
/// /evaluation-items/{id}                             get, update (budget-checked), delete
/// /evaluation-items/{id}/objectives/{objective_id}   link, unlink
/// ```
///
/// Everything except login requires the cedula cookie.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/catalogs", get(handlers::catalog::list))
        .nest("/course-units", course_unit::router())
        .nest("/learning-plans", learning_plan::router())
        .nest("/objectives", objective::router())
        .nest("/evaluation-plans", evaluation_plan::router())
        .nest("/evaluation-items", evaluation_item::router())
}
