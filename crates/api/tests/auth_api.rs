//! HTTP-level tests for the cedula cookie session.
//!
//! Covers login, logout and info, the 401/403 split of the session
//! extractor, and that teachers cannot register themselves.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, get, get_as, post_as, post_json, RICARDO};
use sqlx::PgPool;

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_sets_http_only_cookie(pool: PgPool) {
    common::create_teacher(&pool, RICARDO).await;
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/login", serde_json::json!({ "cedula": RICARDO })).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let cookie = set_cookie(&response);
    assert!(cookie.contains(&format!("cedula={RICARDO}")));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["cedula"], RICARDO);
    assert_eq!(json["full_name"], "Ricardo Marin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_rejects_malformed_cedula(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/login", serde_json::json!({ "cedula": "28318187" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "cedula");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_rejects_unknown_teacher(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/login", serde_json::json!({ "cedula": "V-1234567" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_cookie_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/info").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_cedula_cookie_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_as(app, "/api/v1/learning-plans", "V-1234567").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_info_returns_session_teacher(pool: PgPool) {
    common::create_teacher(&pool, RICARDO).await;
    let app = common::build_test_app(pool);

    let response = get_as(app, "/api/v1/auth/info", RICARDO).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["cedula"], RICARDO);
    assert_eq!(json["email"], "v-28318187@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    common::create_teacher(&pool, RICARDO).await;
    let app = common::build_test_app(pool);

    let response = post_as(app, "/api/v1/auth/logout", RICARDO).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("cedula="));
    assert!(cookie.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_teachers_cannot_self_register(pool: PgPool) {
    let body = serde_json::json!({
        "cedula": "V-11111111",
        "email": "nuevo@example.com",
        "first_name": "Nuevo",
        "last_name": "Docente",
    });

    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "cedula": "V-11111111" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(SET_COOKIE).is_none());
}
