//! `GET /health`: liveness plus the two things a deployment can get wrong,
//! the database schema and the report templates.
//!
//! The status is `degraded` when the database is unreachable or its newest
//! applied migration differs from the newest migration bundled in the binary.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;
use crate::templates::TemplateSource;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub report_templates: TemplateHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration this build ships.
    pub expected_schema_version: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TemplateHealth {
    pub learning_plan: TemplateSource,
    pub evaluation_plan: TemplateSource,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema_version = plandoc_db::schema_version(&state.pool).await;
    let reachable = schema_version.is_ok();
    let schema_version = schema_version.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Database unreachable from health check");
        None
    });
    let expected_schema_version = plandoc_db::latest_migration();

    let status = if reachable && schema_version == expected_schema_version {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            schema_version,
            expected_schema_version,
        },
        report_templates: TemplateHealth {
            learning_plan: state.templates.learning_plan.source,
            evaluation_plan: state.templates.evaluation_plan.source,
        },
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
