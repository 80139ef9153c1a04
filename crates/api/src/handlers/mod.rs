//! Request handlers for the planning resources.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! validate the input DTO, delegate to the corresponding repository in
//! `plandoc_db` scoped to the session teacher, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod catalog;
pub mod course_unit;
pub mod evaluation_item;
pub mod evaluation_plan;
pub mod learning_plan;
pub mod objective;
pub mod report;
