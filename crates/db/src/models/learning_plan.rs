//! Learning plan (plan de aprendizaje) model and DTOs.

use plandoc_core::catalog::{validate_choice, CAMPUSES, SHIFTS};
use plandoc_core::error::CoreError;
use plandoc_core::identity::validate_text;
use plandoc_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::learning_objective::LearningObjective;

pub const GROUP_CODE_MAX_LEN: usize = 64;
pub const PROGRAM_MAX_LEN: usize = 32;

/// A row from the `learning_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningPlan {
    pub group_code: String,
    pub teacher_id: String,
    pub course_unit_code: String,
    pub campus: String,
    pub shift: String,
    pub program: String,
    pub created_at: Timestamp,
    pub modified_at: Option<Timestamp>,
}

/// A learning plan together with its objectives.
#[derive(Debug, Clone, Serialize)]
pub struct LearningPlanDetail {
    #[serde(flatten)]
    pub plan: LearningPlan,
    pub objectives: Vec<LearningObjective>,
}

/// DTO for creating a learning plan. The owner is the session teacher.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLearningPlan {
    pub group_code: String,
    pub course_unit_code: String,
    pub campus: String,
    pub shift: String,
    pub program: String,
}

impl CreateLearningPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("group_code", &self.group_code, GROUP_CODE_MAX_LEN)?;
        validate_text("course_unit_code", &self.course_unit_code, 20)?;
        validate_choice("campus", CAMPUSES, &self.campus)?;
        validate_choice("shift", SHIFTS, &self.shift)?;
        validate_text("program", &self.program, PROGRAM_MAX_LEN)?;
        Ok(())
    }
}

/// DTO for updating a learning plan. The group code is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLearningPlan {
    pub course_unit_code: Option<String>,
    pub campus: Option<String>,
    pub shift: Option<String>,
    pub program: Option<String>,
}

impl UpdateLearningPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(code) = &self.course_unit_code {
            validate_text("course_unit_code", code, 20)?;
        }
        if let Some(campus) = &self.campus {
            validate_choice("campus", CAMPUSES, campus)?;
        }
        if let Some(shift) = &self.shift {
            validate_choice("shift", SHIFTS, shift)?;
        }
        if let Some(program) = &self.program {
            validate_text("program", program, PROGRAM_MAX_LEN)?;
        }
        Ok(())
    }
}
