//! Learning objective model and DTOs.

use plandoc_core::catalog::{validate_choice, STRATEGIES};
use plandoc_core::error::CoreError;
use plandoc_core::identity::{validate_range, validate_text};
use plandoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TITLE_MAX_LEN: usize = 32;
pub const MIN_DURATION_HOURS: i16 = 2;
pub const MAX_DURATION_HOURS: i16 = 9;

/// A row from the `learning_objectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningObjective {
    pub id: DbId,
    pub learning_plan_code: String,
    /// Evaluation item assessing this objective, if any.
    pub evaluation_item_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub success_criterion: String,
    pub strategy: String,
    pub duration_hours: i16,
    pub created_at: Timestamp,
}

/// DTO for adding an objective to a learning plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLearningObjective {
    pub title: String,
    pub content: String,
    pub success_criterion: String,
    /// Defaults to `CL` if omitted.
    pub strategy: Option<String>,
    pub duration_hours: i16,
    /// Must be an item of the same learning plan's evaluation plan.
    pub evaluation_item_id: Option<DbId>,
}

impl CreateLearningObjective {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("title", &self.title, TITLE_MAX_LEN)?;
        validate_text("content", &self.content, usize::MAX)?;
        validate_text("success_criterion", &self.success_criterion, usize::MAX)?;
        if let Some(strategy) = &self.strategy {
            validate_choice("strategy", STRATEGIES, strategy)?;
        }
        validate_range(
            "duration_hours",
            self.duration_hours,
            MIN_DURATION_HOURS,
            MAX_DURATION_HOURS,
        )?;
        Ok(())
    }
}

/// DTO for updating an objective. Only non-`None` fields are applied.
///
/// A present `evaluation_item_id` relinks the objective; clearing a link is
/// done through the item's objective endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLearningObjective {
    pub title: Option<String>,
    pub content: Option<String>,
    pub success_criterion: Option<String>,
    pub strategy: Option<String>,
    pub duration_hours: Option<i16>,
    pub evaluation_item_id: Option<DbId>,
}

impl UpdateLearningObjective {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_text("title", title, TITLE_MAX_LEN)?;
        }
        if let Some(content) = &self.content {
            validate_text("content", content, usize::MAX)?;
        }
        if let Some(criterion) = &self.success_criterion {
            validate_text("success_criterion", criterion, usize::MAX)?;
        }
        if let Some(strategy) = &self.strategy {
            validate_choice("strategy", STRATEGIES, strategy)?;
        }
        if let Some(hours) = self.duration_hours {
            validate_range("duration_hours", hours, MIN_DURATION_HOURS, MAX_DURATION_HOURS)?;
        }
        Ok(())
    }
}
