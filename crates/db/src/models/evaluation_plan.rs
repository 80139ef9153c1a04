//! Evaluation plan (plan de evaluación) model and DTOs.

use plandoc_core::error::CoreError;
use plandoc_core::identity::validate_text;
use plandoc_core::types::{DbId, Timestamp};
use plandoc_core::weights::{export_violations, weight_total, ExportBlockedError, ExportItem, WeightedItem};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::evaluation_item::EvaluationItemDetail;

pub const NAME_MAX_LEN: usize = 128;

/// A row from the `evaluation_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationPlan {
    pub id: DbId,
    pub learning_plan_code: String,
    pub name: String,
    pub created_at: Timestamp,
    pub modified_at: Option<Timestamp>,
}

/// An evaluation plan with its items and each item's objectives.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationPlanDetail {
    #[serde(flatten)]
    pub plan: EvaluationPlan,
    pub total_weight: i32,
    pub items: Vec<EvaluationItemDetail>,
}

/// DTO for creating the evaluation plan of a learning plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvaluationPlan {
    /// Defaults to `P.E de {course unit name} ({group code})` if omitted.
    pub name: Option<String>,
}

/// DTO for renaming an evaluation plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvaluationPlan {
    pub name: Option<String>,
}

fn validate_name(name: Option<&String>) -> Result<(), CoreError> {
    match name {
        Some(name) => validate_text("name", name, NAME_MAX_LEN),
        None => Ok(()),
    }
}

impl CreateEvaluationPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(self.name.as_ref())
    }
}

impl UpdateEvaluationPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(self.name.as_ref())
    }
}

/// Default plan name for a learning plan.
pub fn default_name(course_unit_name: &str, group_code: &str) -> String {
    format!("P.E de {course_unit_name} ({group_code})")
}

/// Whether a plan can be exported right now, and why not.
#[derive(Debug, Clone, Serialize)]
pub struct ExportStatus {
    pub evaluation_plan_id: DbId,
    pub exportable: bool,
    pub total_weight: i32,
    pub violations: Vec<ExportBlockedError>,
}

impl ExportStatus {
    pub fn from_items(evaluation_plan_id: DbId, items: &[ExportItem]) -> Self {
        let weighted: Vec<WeightedItem> = items
            .iter()
            .map(|item| WeightedItem {
                id: item.id,
                weight: item.weight,
            })
            .collect();
        let violations = export_violations(items);
        Self {
            evaluation_plan_id,
            exportable: violations.is_empty(),
            total_weight: weight_total(&weighted, None),
            violations,
        }
    }
}
