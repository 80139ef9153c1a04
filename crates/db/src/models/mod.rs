//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Create/update DTOs expose `validate()` so handlers can reject bad input
//! with a field-tagged error before any query runs.

pub mod course_unit;
pub mod evaluation_item;
pub mod evaluation_plan;
pub mod learning_objective;
pub mod learning_plan;
pub mod report;
pub mod teacher;
