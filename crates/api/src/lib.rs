//! Plandoc API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! report templates) so integration tests, the server binary and the admin
//! CLI can all reach them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod templates;
