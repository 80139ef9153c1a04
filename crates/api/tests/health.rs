//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_as, RICARDO};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["database"]["reachable"], true);
    assert_eq!(json["database"]["schema_version"], 20250301000006_i64);
    assert_eq!(
        json["database"]["schema_version"],
        json["database"]["expected_schema_version"]
    );
    assert_eq!(json["report_templates"]["learning_plan"], "builtin");
    assert_eq!(json["report_templates"]["evaluation_plan"], "builtin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_allows_credentials_and_exposes_report_filename(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let exposed = headers["access-control-expose-headers"].to_str().unwrap();
    assert!(exposed.contains("content-disposition"), "exposed: {exposed}");
    assert!(exposed.contains("x-request-id"), "exposed: {exposed}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_ignores_unknown_origins(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert!(
        response.headers().contains_key("x-request-id"),
        "response should carry the generated request id"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalogs_require_a_session(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/catalogs").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    common::create_teacher(&pool, RICARDO).await;
    let response = get_as(common::build_test_app(pool), "/api/v1/catalogs", RICARDO).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["weights"], serde_json::json!([5, 10, 15, 20, 25]));
    assert_eq!(json["campuses"][0]["code"], "FLO");
    assert_eq!(json["campuses"][0]["label"], "La Floresta");
}
