//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use plandoc_api::config::ServerConfig;
use plandoc_api::router::build_app_router;
use plandoc_api::state::AppState;
use plandoc_api::templates::ReportTemplates;
use plandoc_db::models::course_unit::CreateCourseUnit;
use plandoc_db::models::teacher::CreateTeacher;
use plandoc_db::repositories::{CourseUnitRepo, TeacherRepo};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const RICARDO: &str = "V-28318187";
pub const VICTORIA: &str = "V-22807503";

/// Build a test `ServerConfig` with safe defaults and built-in templates.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        teacher_cookie_name: "cedula".to_string(),
        learning_plan_template: None,
        evaluation_plan_template: None,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        templates: Arc::new(ReportTemplates::builtin().expect("built-in templates")),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_teacher(pool: &PgPool, cedula: &str) {
    TeacherRepo::create(
        pool,
        &CreateTeacher {
            cedula: cedula.to_string(),
            email: format!("{}@example.com", cedula.to_lowercase()),
            first_name: "Ricardo".to_string(),
            last_name: "Marin".to_string(),
        },
    )
    .await
    .expect("teacher creation should succeed");
}

pub async fn create_course_unit(pool: &PgPool, code: &str) {
    CourseUnitRepo::create(
        pool,
        &CreateCourseUnit {
            code: code.to_string(),
            track: 1,
            semester: Some("1".to_string()),
            credits: 4,
            name: "Matemática I".to_string(),
        },
    )
    .await
    .expect("course unit creation should succeed");
}

/// Create a learning plan through the API and return its group code.
pub async fn create_plan(pool: &PgPool, cedula: &str, group_code: &str) -> String {
    let body = serde_json::json!({
        "group_code": group_code,
        "course_unit_code": "MAT-1",
        "campus": "FLO",
        "shift": "M",
        "program": "Informática (PNFi)",
    });
    let response = post_json_as(build_test_app(pool.clone()), "/api/v1/learning-plans", cedula, body).await;
    assert_eq!(response.status(), 201, "learning plan creation should succeed");
    group_code.to_string()
}

/// Add an objective to a plan through the API and return its id.
pub async fn create_objective(pool: &PgPool, cedula: &str, group_code: &str, title: &str) -> i64 {
    let body = serde_json::json!({
        "title": title,
        "content": "Contenido del objetivo",
        "success_criterion": "Criterio de logro",
        "duration_hours": 4,
    });
    let response = post_json_as(
        build_test_app(pool.clone()),
        &format!("/api/v1/learning-plans/{group_code}/objectives"),
        cedula,
        body,
    )
    .await;
    assert_eq!(response.status(), 201, "objective creation should succeed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create the evaluation plan of a learning plan and return its id.
pub async fn create_evaluation_plan(pool: &PgPool, cedula: &str, group_code: &str) -> i64 {
    let response = post_json_as(
        build_test_app(pool.clone()),
        &format!("/api/v1/learning-plans/{group_code}/evaluation-plan"),
        cedula,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), 201, "evaluation plan creation should succeed");
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, cedula: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cedula) = cedula {
        builder = builder.header(COOKIE, format!("cedula={cedula}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn get_as(app: Router, uri: &str, cedula: &str) -> Response {
    send(app, request(Method::GET, uri, Some(cedula), None)).await
}

pub async fn post_as(app: Router, uri: &str, cedula: &str) -> Response {
    send(app, request(Method::POST, uri, Some(cedula), None)).await
}

pub async fn post_json_as(app: Router, uri: &str, cedula: &str, body: Value) -> Response {
    send(app, request(Method::POST, uri, Some(cedula), Some(body))).await
}

pub async fn put_json_as(app: Router, uri: &str, cedula: &str, body: Value) -> Response {
    send(app, request(Method::PUT, uri, Some(cedula), Some(body))).await
}

pub async fn put_as(app: Router, uri: &str, cedula: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(cedula), None)).await
}

pub async fn delete_as(app: Router, uri: &str, cedula: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(cedula), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}
