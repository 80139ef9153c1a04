//! Course unit (unidad curricular) model and DTOs.

use plandoc_core::catalog::{validate_choice, validate_track, SEMESTERS};
use plandoc_core::error::CoreError;
use plandoc_core::identity::{validate_range, validate_text};
use plandoc_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const CODE_MAX_LEN: usize = 20;
pub const NAME_MAX_LEN: usize = 32;

/// A row from the `course_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseUnit {
    pub code: String,
    pub track: i16,
    pub semester: String,
    pub credits: i16,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a course unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseUnit {
    pub code: String,
    pub track: i16,
    /// Defaults to `NA` if omitted.
    pub semester: Option<String>,
    pub credits: i16,
    pub name: String,
}

impl CreateCourseUnit {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("code", &self.code, CODE_MAX_LEN)?;
        validate_track(self.track)?;
        if let Some(semester) = &self.semester {
            validate_choice("semester", SEMESTERS, semester)?;
        }
        validate_range("credits", self.credits, 1, 10)?;
        validate_text("name", &self.name, NAME_MAX_LEN)?;
        Ok(())
    }
}

/// DTO for updating a course unit. The code is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseUnit {
    pub track: Option<i16>,
    pub semester: Option<String>,
    pub credits: Option<i16>,
    pub name: Option<String>,
}

impl UpdateCourseUnit {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(track) = self.track {
            validate_track(track)?;
        }
        if let Some(semester) = &self.semester {
            validate_choice("semester", SEMESTERS, semester)?;
        }
        if let Some(credits) = self.credits {
            validate_range("credits", credits, 1, 10)?;
        }
        if let Some(name) = &self.name {
            validate_text("name", name, NAME_MAX_LEN)?;
        }
        Ok(())
    }
}
