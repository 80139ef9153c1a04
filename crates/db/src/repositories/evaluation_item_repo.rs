//! Repository for the `evaluation_items` table.
//!
//! Item writes are the only place the weight budget is enforced. Each write
//! runs in one transaction that first locks the parent evaluation plan row,
//! so two concurrent inserts cannot both pass the check and jointly exceed
//! 100%.

use plandoc_core::types::DbId;
use plandoc_core::weights::{validate_weight_budget, WeightedItem, DEFAULT_WEIGHT};
use sqlx::PgPool;

use crate::error::ItemWriteError;
use crate::models::evaluation_item::{CreateEvaluationItem, EvaluationItem, UpdateEvaluationItem};
use crate::models::learning_objective::LearningObjective;
use crate::repositories::{EvaluationPlanRepo, LearningPlanRepo};

const COLUMNS: &str = "id, evaluation_plan_id, instrument, evaluation_type, skills, weight, \
    planned_date, created_at";

const OBJECTIVE_COLUMNS: &str = "id, learning_plan_code, evaluation_item_id, title, content, \
    success_criterion, strategy, duration_hours, created_at";

/// Provides budget-checked CRUD operations for evaluation items.
pub struct EvaluationItemRepo;

impl EvaluationItemRepo {
    /// Add an item to an owned evaluation plan.
    ///
    /// Defaults: instrument `PR`, type `FO`, weight 15. Rejects the write with
    /// [`ItemWriteError::OverBudget`] when the plan total would exceed 100.
    pub async fn create(
        pool: &PgPool,
        teacher_id: &str,
        evaluation_plan_id: DbId,
        input: &CreateEvaluationItem,
    ) -> Result<EvaluationItem, ItemWriteError> {
        let mut tx = pool.begin().await?;

        let Some(group_code) = Self::lock_plan(&mut tx, teacher_id, evaluation_plan_id).await? else {
            return Err(ItemWriteError::not_found("EvaluationPlan", evaluation_plan_id));
        };

        let weight = input.weight.unwrap_or(DEFAULT_WEIGHT);
        let existing = Self::weights_inner(&mut tx, evaluation_plan_id).await?;
        if let Err(err) = validate_weight_budget(&existing, weight, None) {
            tracing::warn!(
                evaluation_plan_id,
                attempted_weight = err.attempted_weight,
                current_total = err.current_total,
                "Rejected evaluation item over weight budget"
            );
            return Err(err.into());
        }

        let query = format!(
            "INSERT INTO evaluation_items
                (evaluation_plan_id, instrument, evaluation_type, skills, weight, planned_date)
             VALUES ($1, COALESCE($2, 'PR'), COALESCE($3, 'FO'), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, EvaluationItem>(&query)
            .bind(evaluation_plan_id)
            .bind(&input.instrument)
            .bind(&input.evaluation_type)
            .bind(&input.skills)
            .bind(weight)
            .bind(input.planned_date)
            .fetch_one(&mut *tx)
            .await?;

        if !input.objective_ids.is_empty() {
            Self::link_objectives_inner(&mut tx, item.id, &group_code, &input.objective_ids).await?;
            LearningPlanRepo::touch(&mut tx, &group_code).await?;
        }

        EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        tx.commit().await?;

        tracing::info!(
            item_id = item.id,
            evaluation_plan_id,
            weight,
            "Evaluation item created"
        );
        Ok(item)
    }

    /// Find an item of one of the teacher's evaluation plans.
    pub async fn find(pool: &PgPool, teacher_id: &str, id: DbId) -> Result<Option<EvaluationItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluation_items
             WHERE id = $1
               AND evaluation_plan_id IN (
                   SELECT ep.id FROM evaluation_plans ep
                   JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
                   WHERE lp.teacher_id = $2
               )"
        );
        sqlx::query_as::<_, EvaluationItem>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Items of a plan ordered by planned date. Callers check plan ownership.
    pub async fn list_by_plan(pool: &PgPool, evaluation_plan_id: DbId) -> Result<Vec<EvaluationItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluation_items
             WHERE evaluation_plan_id = $1
             ORDER BY planned_date, id"
        );
        sqlx::query_as::<_, EvaluationItem>(&query)
            .bind(evaluation_plan_id)
            .fetch_all(pool)
            .await
    }

    /// Update an owned item. Only non-`None` fields are applied.
    ///
    /// The budget is checked with the item's own previous weight excluded.
    /// A present `objective_ids` replaces the item's linked objectives.
    pub async fn update(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
        input: &UpdateEvaluationItem,
    ) -> Result<EvaluationItem, ItemWriteError> {
        let mut tx = pool.begin().await?;

        let current: Option<(DbId, i16, String)> = sqlx::query_as(
            "SELECT ei.evaluation_plan_id, ei.weight, ep.learning_plan_code
             FROM evaluation_items ei
             JOIN evaluation_plans ep ON ep.id = ei.evaluation_plan_id
             JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
             WHERE ei.id = $1 AND lp.teacher_id = $2
             FOR UPDATE OF ep",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((evaluation_plan_id, current_weight, group_code)) = current else {
            return Err(ItemWriteError::not_found("EvaluationItem", id));
        };

        let weight = input.weight.unwrap_or(current_weight);
        let existing = Self::weights_inner(&mut tx, evaluation_plan_id).await?;
        if let Err(err) = validate_weight_budget(&existing, weight, Some(id)) {
            tracing::warn!(
                item_id = id,
                evaluation_plan_id,
                attempted_weight = err.attempted_weight,
                current_total = err.current_total,
                "Rejected evaluation item update over weight budget"
            );
            return Err(err.into());
        }

        let query = format!(
            "UPDATE evaluation_items SET
                instrument = COALESCE($2, instrument),
                evaluation_type = COALESCE($3, evaluation_type),
                skills = COALESCE($4, skills),
                weight = $5,
                planned_date = COALESCE($6, planned_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, EvaluationItem>(&query)
            .bind(id)
            .bind(&input.instrument)
            .bind(&input.evaluation_type)
            .bind(&input.skills)
            .bind(weight)
            .bind(input.planned_date)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(objective_ids) = &input.objective_ids {
            sqlx::query("UPDATE learning_objectives SET evaluation_item_id = NULL WHERE evaluation_item_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_objectives_inner(&mut tx, id, &group_code, objective_ids).await?;
            LearningPlanRepo::touch(&mut tx, &group_code).await?;
        }

        EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        tx.commit().await?;
        Ok(item)
    }

    /// Delete an owned item. Linked objectives stay, with their link cleared
    /// by the `ON DELETE SET NULL` foreign key.
    pub async fn delete(pool: &PgPool, teacher_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> = sqlx::query_as(
            "DELETE FROM evaluation_items
             WHERE id = $1
               AND evaluation_plan_id IN (
                   SELECT ep.id FROM evaluation_plans ep
                   JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
                   WHERE lp.teacher_id = $2
               )
             RETURNING evaluation_plan_id",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((evaluation_plan_id,)) = deleted else {
            return Ok(false);
        };
        EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        tx.commit().await?;

        tracing::info!(item_id = id, evaluation_plan_id, "Evaluation item deleted");
        Ok(true)
    }

    /// Link an objective of the same learning plan to an owned item.
    pub async fn link_objective(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
        objective_id: DbId,
    ) -> Result<LearningObjective, ItemWriteError> {
        let mut tx = pool.begin().await?;

        let owner: Option<(DbId, String)> = sqlx::query_as(
            "SELECT ep.id, ep.learning_plan_code
             FROM evaluation_items ei
             JOIN evaluation_plans ep ON ep.id = ei.evaluation_plan_id
             JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
             WHERE ei.id = $1 AND lp.teacher_id = $2",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((evaluation_plan_id, group_code)) = owner else {
            return Err(ItemWriteError::not_found("EvaluationItem", id));
        };

        let objective_plan: Option<(String,)> = sqlx::query_as(
            "SELECT learning_plan_code FROM learning_objectives
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)",
        )
        .bind(objective_id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;
        match objective_plan {
            None => return Err(ItemWriteError::not_found("LearningObjective", objective_id)),
            Some((code,)) if code != group_code => {
                return Err(ItemWriteError::ForeignObjective {
                    objective_id,
                    learning_plan_code: group_code,
                })
            }
            Some(_) => {}
        }

        let query = format!(
            "UPDATE learning_objectives SET evaluation_item_id = $2
             WHERE id = $1
             RETURNING {OBJECTIVE_COLUMNS}"
        );
        let objective = sqlx::query_as::<_, LearningObjective>(&query)
            .bind(objective_id)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        LearningPlanRepo::touch(&mut tx, &group_code).await?;
        EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        tx.commit().await?;
        Ok(objective)
    }

    /// Clear the link between an owned item and one of its objectives.
    ///
    /// Returns `false` if the objective is not linked to this item.
    pub async fn unlink_objective(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
        objective_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let unlinked: Option<(String,)> = sqlx::query_as(
            "UPDATE learning_objectives SET evaluation_item_id = NULL
             WHERE id = $1 AND evaluation_item_id = $2
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $3)
             RETURNING learning_plan_code",
        )
        .bind(objective_id)
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((group_code,)) = unlinked else {
            return Ok(false);
        };
        LearningPlanRepo::touch(&mut tx, &group_code).await?;
        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Lock an owned evaluation plan row and return its learning plan code.
    async fn lock_plan(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        teacher_id: &str,
        evaluation_plan_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT ep.learning_plan_code FROM evaluation_plans ep
             JOIN learning_plans lp ON lp.group_code = ep.learning_plan_code
             WHERE ep.id = $1 AND lp.teacher_id = $2
             FOR UPDATE OF ep",
        )
        .bind(evaluation_plan_id)
        .bind(teacher_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.map(|(code,)| code))
    }

    /// Current item weights of a plan, read under the plan lock.
    async fn weights_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        evaluation_plan_id: DbId,
    ) -> Result<Vec<WeightedItem>, sqlx::Error> {
        let rows: Vec<(DbId, i16)> =
            sqlx::query_as("SELECT id, weight FROM evaluation_items WHERE evaluation_plan_id = $1")
                .bind(evaluation_plan_id)
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, weight)| WeightedItem { id, weight })
            .collect())
    }

    /// Point each objective at `item_id`; every objective must belong to `group_code`.
    async fn link_objectives_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        item_id: DbId,
        group_code: &str,
        objective_ids: &[DbId],
    ) -> Result<(), ItemWriteError> {
        for &objective_id in objective_ids {
            let result = sqlx::query(
                "UPDATE learning_objectives SET evaluation_item_id = $1
                 WHERE id = $2 AND learning_plan_code = $3",
            )
            .bind(item_id)
            .bind(objective_id)
            .bind(group_code)
            .execute(&mut **tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(ItemWriteError::ForeignObjective {
                    objective_id,
                    learning_plan_code: group_code.to_string(),
                });
            }
        }
        Ok(())
    }
}
