//! Repository for the `learning_objectives` table.

use plandoc_core::types::DbId;
use sqlx::PgPool;

use crate::error::ItemWriteError;
use crate::models::learning_objective::{
    CreateLearningObjective, LearningObjective, UpdateLearningObjective,
};
use crate::repositories::{EvaluationPlanRepo, LearningPlanRepo};

const COLUMNS: &str = "id, learning_plan_code, evaluation_item_id, title, content, \
    success_criterion, strategy, duration_hours, created_at";

/// Provides CRUD operations for learning objectives.
///
/// Writes stamp the parent learning plan's `modified_at` in the same
/// transaction, and the evaluation plan's too when an item is linked.
pub struct LearningObjectiveRepo;

impl LearningObjectiveRepo {
    /// Add an objective to an owned learning plan.
    ///
    /// `strategy` defaults to `CL`. A given `evaluation_item_id` must be an
    /// item of the same learning plan's evaluation plan.
    pub async fn create(
        pool: &PgPool,
        teacher_id: &str,
        group_code: &str,
        input: &CreateLearningObjective,
    ) -> Result<LearningObjective, ItemWriteError> {
        let mut tx = pool.begin().await?;

        if !LearningPlanRepo::lock_owned(&mut tx, teacher_id, group_code).await? {
            return Err(ItemWriteError::not_found("LearningPlan", group_code));
        }
        let linked_plan = match input.evaluation_item_id {
            Some(item_id) => Some(Self::check_item_in_plan(&mut tx, item_id, group_code).await?),
            None => None,
        };

        let query = format!(
            "INSERT INTO learning_objectives
                (learning_plan_code, evaluation_item_id, title, content, success_criterion, strategy, duration_hours)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'CL'), $7)
             RETURNING {COLUMNS}"
        );
        let objective = sqlx::query_as::<_, LearningObjective>(&query)
            .bind(group_code)
            .bind(input.evaluation_item_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.success_criterion)
            .bind(&input.strategy)
            .bind(input.duration_hours)
            .fetch_one(&mut *tx)
            .await?;

        LearningPlanRepo::touch(&mut tx, group_code).await?;
        if let Some(evaluation_plan_id) = linked_plan {
            EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        }
        tx.commit().await?;

        tracing::info!(
            objective_id = objective.id,
            learning_plan = %group_code,
            "Learning objective created"
        );
        Ok(objective)
    }

    /// Find an objective of one of the teacher's plans.
    pub async fn find(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
    ) -> Result<Option<LearningObjective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_objectives
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)"
        );
        sqlx::query_as::<_, LearningObjective>(&query)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Objectives of a plan in creation order. Callers check plan ownership.
    pub async fn list_by_plan(pool: &PgPool, group_code: &str) -> Result<Vec<LearningObjective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_objectives WHERE learning_plan_code = $1 ORDER BY id"
        );
        sqlx::query_as::<_, LearningObjective>(&query)
            .bind(group_code)
            .fetch_all(pool)
            .await
    }

    /// Objectives linked to any of `item_ids`.
    pub async fn list_by_items(
        pool: &PgPool,
        item_ids: &[DbId],
    ) -> Result<Vec<LearningObjective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_objectives WHERE evaluation_item_id = ANY($1) ORDER BY id"
        );
        sqlx::query_as::<_, LearningObjective>(&query)
            .bind(item_ids)
            .fetch_all(pool)
            .await
    }

    /// Update an owned objective. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        teacher_id: &str,
        id: DbId,
        input: &UpdateLearningObjective,
    ) -> Result<LearningObjective, ItemWriteError> {
        let mut tx = pool.begin().await?;

        let owner: Option<(String,)> = sqlx::query_as(
            "SELECT lo.learning_plan_code FROM learning_objectives lo
             JOIN learning_plans lp ON lp.group_code = lo.learning_plan_code
             WHERE lo.id = $1 AND lp.teacher_id = $2
             FOR UPDATE OF lo",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((group_code,)) = owner else {
            return Err(ItemWriteError::not_found("LearningObjective", id));
        };

        let linked_plan = match input.evaluation_item_id {
            Some(item_id) => Some(Self::check_item_in_plan(&mut tx, item_id, &group_code).await?),
            None => None,
        };

        let query = format!(
            "UPDATE learning_objectives SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                success_criterion = COALESCE($4, success_criterion),
                strategy = COALESCE($5, strategy),
                duration_hours = COALESCE($6, duration_hours),
                evaluation_item_id = COALESCE($7, evaluation_item_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let objective = sqlx::query_as::<_, LearningObjective>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.success_criterion)
            .bind(&input.strategy)
            .bind(input.duration_hours)
            .bind(input.evaluation_item_id)
            .fetch_one(&mut *tx)
            .await?;

        LearningPlanRepo::touch(&mut tx, &group_code).await?;
        if let Some(evaluation_plan_id) = linked_plan {
            EvaluationPlanRepo::touch(&mut tx, evaluation_plan_id).await?;
        }
        tx.commit().await?;
        Ok(objective)
    }

    /// Delete an owned objective. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, teacher_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(String,)> = sqlx::query_as(
            "DELETE FROM learning_objectives
             WHERE id = $1
               AND learning_plan_code IN (SELECT group_code FROM learning_plans WHERE teacher_id = $2)
             RETURNING learning_plan_code",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((group_code,)) = deleted else {
            return Ok(false);
        };
        LearningPlanRepo::touch(&mut tx, &group_code).await?;
        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fail unless `item_id` belongs to the evaluation plan of `group_code`.
    /// Returns that evaluation plan's id.
    async fn check_item_in_plan(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        item_id: DbId,
        group_code: &str,
    ) -> Result<DbId, ItemWriteError> {
        let found: Option<(DbId,)> = sqlx::query_as(
            "SELECT ei.evaluation_plan_id FROM evaluation_items ei
             JOIN evaluation_plans ep ON ep.id = ei.evaluation_plan_id
             WHERE ei.id = $1 AND ep.learning_plan_code = $2",
        )
        .bind(item_id)
        .bind(group_code)
        .fetch_optional(&mut **tx)
        .await?;

        match found {
            Some((evaluation_plan_id,)) => Ok(evaluation_plan_id),
            None => Err(ItemWriteError::ForeignItem {
                item_id,
                learning_plan_code: group_code.to_string(),
            }),
        }
    }
}
