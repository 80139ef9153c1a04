//! Teacher entity model and DTOs.

use plandoc_core::error::CoreError;
use plandoc_core::identity::{full_name, validate_cedula, validate_email, validate_text};
use plandoc_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A teacher row from the `teachers` table. `id` is the cedula.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// DTO for registering a teacher (admin CLI and seed data).
#[derive(Debug, Clone)]
pub struct CreateTeacher {
    pub cedula: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl CreateTeacher {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_cedula(&self.cedula)?;
        validate_email(&self.email)?;
        validate_text("first_name", &self.first_name, 64)?;
        validate_text("last_name", &self.last_name, 64)?;
        Ok(())
    }
}
