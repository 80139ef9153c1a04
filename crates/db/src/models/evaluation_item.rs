//! Evaluation item model and DTOs.

use plandoc_core::catalog::{validate_choice, EVALUATION_TYPES, INSTRUMENTS};
use plandoc_core::error::CoreError;
use plandoc_core::identity::validate_text;
use plandoc_core::types::{Date, DbId, Timestamp};
use plandoc_core::weights::validate_weight_option;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::learning_objective::LearningObjective;

/// A row from the `evaluation_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationItem {
    pub id: DbId,
    pub evaluation_plan_id: DbId,
    pub instrument: String,
    pub evaluation_type: String,
    pub skills: String,
    pub weight: i16,
    pub planned_date: Date,
    pub created_at: Timestamp,
}

/// An item with the objectives it assesses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationItemDetail {
    #[serde(flatten)]
    pub item: EvaluationItem,
    pub objectives: Vec<LearningObjective>,
}

/// DTO for adding an item to an evaluation plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvaluationItem {
    /// Defaults to `PR` if omitted.
    pub instrument: Option<String>,
    /// Defaults to `FO` if omitted.
    pub evaluation_type: Option<String>,
    pub skills: String,
    /// Defaults to 15 if omitted.
    pub weight: Option<i16>,
    pub planned_date: Date,
    /// Objectives to link; each must belong to the plan's learning plan.
    #[serde(default)]
    pub objective_ids: Vec<DbId>,
}

impl CreateEvaluationItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(instrument) = &self.instrument {
            validate_choice("instrument", INSTRUMENTS, instrument)?;
        }
        if let Some(kind) = &self.evaluation_type {
            validate_choice("evaluation_type", EVALUATION_TYPES, kind)?;
        }
        validate_text("skills", &self.skills, usize::MAX)?;
        if let Some(weight) = self.weight {
            validate_weight_option(weight)?;
        }
        Ok(())
    }
}

/// DTO for updating an item. Only non-`None` fields are applied.
///
/// A present `objective_ids` replaces the item's whole set of linked
/// objectives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvaluationItem {
    pub instrument: Option<String>,
    pub evaluation_type: Option<String>,
    pub skills: Option<String>,
    pub weight: Option<i16>,
    pub planned_date: Option<Date>,
    pub objective_ids: Option<Vec<DbId>>,
}

impl UpdateEvaluationItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(instrument) = &self.instrument {
            validate_choice("instrument", INSTRUMENTS, instrument)?;
        }
        if let Some(kind) = &self.evaluation_type {
            validate_choice("evaluation_type", EVALUATION_TYPES, kind)?;
        }
        if let Some(skills) = &self.skills {
            validate_text("skills", skills, usize::MAX)?;
        }
        if let Some(weight) = self.weight {
            validate_weight_option(weight)?;
        }
        Ok(())
    }
}
