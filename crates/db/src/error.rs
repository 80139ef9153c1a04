use plandoc_core::types::DbId;
use plandoc_core::weights::OverBudgetError;

/// Failure of a write that checks the weight budget or objective links.
#[derive(Debug, thiserror::Error)]
pub enum ItemWriteError {
    /// The new weight would push the evaluation plan above 100%.
    #[error(transparent)]
    OverBudget(#[from] OverBudgetError),

    /// The parent plan, item or objective does not exist for this teacher.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The evaluation item is not part of the objective's learning plan.
    #[error("El ítem de evaluación {item_id} no pertenece al plan de aprendizaje {learning_plan_code}.")]
    ForeignItem {
        item_id: DbId,
        learning_plan_code: String,
    },

    /// The objective is not part of the item's learning plan.
    #[error("El objetivo {objective_id} no pertenece al plan de aprendizaje {learning_plan_code}.")]
    ForeignObjective {
        objective_id: DbId,
        learning_plan_code: String,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ItemWriteError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
