use std::sync::Arc;

use crate::config::ServerConfig;
use crate::templates::ReportTemplates;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: plandoc_db::DbPool,
    /// Server configuration (cookie name, timeouts, template paths).
    pub config: Arc<ServerConfig>,
    /// Background pages for the two report kinds, loaded once at startup.
    pub templates: Arc<ReportTemplates>,
}
